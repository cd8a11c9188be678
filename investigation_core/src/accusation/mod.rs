//! Accusation checking.
//!
//! An accusation names a killer, a weapon and a method. It is correct only when
//! all three agree with the solution:
//! - **Killer**: exact match on the suspect id
//! - **Weapon**: the free text contains any accepted weapon name, ignoring case
//! - **Method**: the free text contains any of the solution's keywords, ignoring case
//!
//! Matching is plain substring search; there is no tokenizing
//! and no partial credit.

mod form;

pub use form::*;

use case_rules::{Solution, SuspectId};
use serde::{Deserialize, Serialize};

/// Outcome of an accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Check an accusation against the solution.
pub fn evaluate(solution: &Solution, killer: &SuspectId, weapon: &str, explanation: &str) -> Verdict {
    let killer_ok = solution.is_killer(killer);
    let weapon_ok = contains_any(weapon, &solution.weapons);
    let method_ok = contains_any(explanation, &solution.explanation_keywords);

    if killer_ok && weapon_ok && method_ok {
        Verdict::Correct
    } else {
        Verdict::Wrong
    }
}

/// Case-insensitive "contains any of".
fn contains_any(text: &str, needles: &[String]) -> bool {
    let text = text.to_lowercase();
    needles
        .iter()
        .any(|needle| text.contains(&needle.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_rules::CaseFile;

    fn solution() -> Solution {
        CaseFile::builtin().unwrap().solution().clone()
    }

    fn killer() -> SuspectId {
        SuspectId::new("samir")
    }

    #[test]
    fn test_correct_accusation() {
        let verdict = evaluate(
            &solution(),
            &killer(),
            "a poisoned bookmark",
            "He knew the victim would lick his finger",
        );
        assert_eq!(verdict, Verdict::Correct);
        assert!(verdict.is_correct());
    }

    #[test]
    fn test_correct_accusation_in_arabic() {
        let verdict = evaluate(
            &solution(),
            &killer(),
            "المخطوطة المسمومة",
            "دهن زوايا الصفحات بالسم لأن الضحية يلعق إصبعه",
        );
        assert_eq!(verdict, Verdict::Correct);
    }

    #[test]
    fn test_missing_keywords_is_wrong() {
        let verdict = evaluate(
            &solution(),
            &killer(),
            "a poisoned bookmark",
            "He was angry about the forgery",
        );
        assert_eq!(verdict, Verdict::Wrong);
    }

    #[test]
    fn test_wrong_killer_is_wrong() {
        let verdict = evaluate(
            &solution(),
            &SuspectId::new("hala"),
            "a poisoned bookmark",
            "poison on every page",
        );
        assert_eq!(verdict, Verdict::Wrong);
    }

    #[test]
    fn test_wrong_weapon_is_wrong() {
        let verdict = evaluate(&solution(), &killer(), "the tea cup", "poison on every page");
        assert_eq!(verdict, Verdict::Wrong);
    }

    #[test]
    fn test_matching_ignores_case() {
        let verdict = evaluate(
            &solution(),
            &killer(),
            "A RARE MANUSCRIPT",
            "Every PAGE was coated",
        );
        assert_eq!(verdict, Verdict::Correct);
    }

    #[test]
    fn test_killer_match_is_exact() {
        let verdict = evaluate(&solution(), &SuspectId::new("Samir"), "book", "page");
        assert_eq!(verdict, Verdict::Wrong);
    }

    #[test]
    fn test_empty_input_is_wrong_not_a_crash() {
        assert_eq!(evaluate(&solution(), &SuspectId::new(""), "", ""), Verdict::Wrong);
    }
}
