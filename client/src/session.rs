use std::collections::HashMap;

use inkcalc_shared::ExprResult;

#[derive(Clone, Debug, PartialEq)]
pub struct ResultEntry {
    pub expression: String,
    pub answer: String,
}

impl ResultEntry {
    pub fn display_text(&self) -> String {
        format!("{} = {}", self.expression, self.answer)
    }
}

/// Solve-side session state: the variable substitution table, the ordered
/// result entries, and the reset generation used to invalidate reveal timers
/// scheduled before a reset.
pub struct Session {
    pub variables: HashMap<String, String>,
    pub results: Vec<ResultEntry>,
    generation: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            results: Vec::new(),
            generation: 0,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn is_live(&self, generation: u32) -> bool {
        self.generation == generation
    }

    /// Upsert every `assign` triple into the variable table. Non-assign
    /// triples never touch the table.
    pub fn merge_assignments(&mut self, triples: &[ExprResult]) {
        for triple in triples {
            if triple.assign {
                self.variables
                    .insert(triple.expr.clone(), triple.result.clone());
            }
        }
    }

    pub fn push_result(&mut self, entry: ResultEntry) {
        self.results.push(entry);
    }

    /// The only operation that empties the variable table. Bumping the
    /// generation strands any reveal timer scheduled before the reset.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.results.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(expr: &str, result: &str, assign: bool) -> ExprResult {
        ExprResult {
            expr: expr.into(),
            result: result.into(),
            assign,
        }
    }

    #[test]
    fn assignments_upsert_and_overwrite() {
        let mut session = Session::new();
        session.merge_assignments(&[triple("x", "2", true), triple("x + 1", "3", false)]);
        assert_eq!(session.variables.get("x").map(String::as_str), Some("2"));
        assert_eq!(session.variables.len(), 1);

        session.merge_assignments(&[triple("x", "3", true)]);
        assert_eq!(session.variables.get("x").map(String::as_str), Some("3"));
        assert_eq!(session.variables.len(), 1);
    }

    #[test]
    fn results_keep_arrival_order() {
        let mut session = Session::new();
        session.push_result(ResultEntry {
            expression: "x".into(),
            answer: "2".into(),
        });
        session.push_result(ResultEntry {
            expression: "2 + 2".into(),
            answer: "4".into(),
        });
        assert_eq!(session.results[0].display_text(), "x = 2");
        assert_eq!(session.results[1].display_text(), "2 + 2 = 4");
    }

    #[test]
    fn reset_empties_everything_and_strands_old_timers() {
        let mut session = Session::new();
        session.merge_assignments(&[triple("x", "2", true)]);
        session.push_result(ResultEntry {
            expression: "x".into(),
            answer: "2".into(),
        });

        let scheduled_under = session.generation();
        session.reset();

        assert!(session.variables.is_empty());
        assert!(session.results.is_empty());
        assert!(!session.is_live(scheduled_under));
        assert!(session.is_live(session.generation()));
    }

    #[test]
    fn overlapping_responses_merge_independently() {
        // Two in-flight solves complete in network order; both land.
        let mut session = Session::new();
        session.merge_assignments(&[triple("a", "1", true)]);
        session.merge_assignments(&[triple("b", "2", true), triple("a", "9", true)]);
        assert_eq!(session.variables.get("a").map(String::as_str), Some("9"));
        assert_eq!(session.variables.get("b").map(String::as_str), Some("2"));
    }
}
