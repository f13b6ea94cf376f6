//! Problem generation
//!
//! Pure with respect to session state: the only input besides the operation
//! is the random source, so a seeded RNG reproduces the same problems.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::answer::Answer;
use super::operation::Operation;
use crate::consts::*;

/// A single arithmetic problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operation: Operation,
    pub answer: Answer,
    /// `"{a} {symbol} {b}"`
    pub display_text: String,
}

impl Problem {
    /// Build a problem from explicit operands (`None` only for division by zero)
    pub fn new(operation: Operation, operand_a: i32, operand_b: i32) -> Option<Self> {
        let answer = operation.apply(operand_a, operand_b)?;
        Some(Self {
            operand_a,
            operand_b,
            operation,
            answer,
            display_text: format!("{} {} {}", operand_a, operation.symbol(), operand_b),
        })
    }

    pub fn is_correct(&self, answer: Answer) -> bool {
        self.answer == answer
    }
}

/// The multiple-choice options for a problem, in presentation order
///
/// Always holds exactly `CHOICE_COUNT` distinct values, one of which is the
/// problem's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChoiceSet {
    options: Vec<Answer>,
}

impl ChoiceSet {
    /// Start from the answer, add distinct distractors, then shuffle
    pub fn build<R: Rng + ?Sized>(answer: Answer, rng: &mut R) -> Self {
        let mut options = Vec::with_capacity(CHOICE_COUNT);
        options.push(answer);
        while options.len() < CHOICE_COUNT {
            let candidate = Answer::whole(rng.random_range(DISTRACTOR_RANGE));
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options.shuffle(rng);
        Self { options }
    }

    pub fn as_slice(&self) -> &[Answer] {
        &self.options
    }

    pub fn get(&self, index: usize) -> Option<Answer> {
        self.options.get(index).copied()
    }

    pub fn contains(&self, answer: Answer) -> bool {
        self.options.contains(&answer)
    }

    pub fn position(&self, answer: Answer) -> Option<usize> {
        self.options.iter().position(|&a| a == answer)
    }

    pub fn iter(&self) -> impl Iterator<Item = Answer> + '_ {
        self.options.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Draw a fresh problem for `operation` with operands from `OPERAND_RANGE`
pub fn generate<R: Rng + ?Sized>(operation: Operation, rng: &mut R) -> (Problem, ChoiceSet) {
    loop {
        let a = rng.random_range(OPERAND_RANGE);
        let b = rng.random_range(OPERAND_RANGE);
        // Operands start at 1, so this only repeats if the range ever admits 0
        if let Some(round) = generate_with_operands(operation, a, b, rng) {
            return round;
        }
    }
}

/// Same as [`generate`] with fixed operands; choices still come from `rng`
pub fn generate_with_operands<R: Rng + ?Sized>(
    operation: Operation,
    a: i32,
    b: i32,
    rng: &mut R,
) -> Option<(Problem, ChoiceSet)> {
    let problem = Problem::new(operation, a, b)?;
    let choices = ChoiceSet::build(problem.answer, rng);
    Some((problem, choices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_valid_choices(problem: &Problem, choices: &ChoiceSet) {
        assert_eq!(choices.len(), CHOICE_COUNT);
        let correct = choices.iter().filter(|&c| c == problem.answer).count();
        assert_eq!(correct, 1, "exactly one option must be the answer");
        for (i, a) in choices.iter().enumerate() {
            for b in choices.iter().skip(i + 1) {
                assert_ne!(a, b, "options must be distinct");
            }
        }
        for c in choices.iter().filter(|&c| c != problem.answer) {
            let n = c.as_whole().expect("distractors are whole numbers");
            assert!(DISTRACTOR_RANGE.contains(&n));
        }
    }

    #[test]
    fn test_thousand_problems_per_operation() {
        let mut rng = Pcg32::seed_from_u64(7);
        for op in Operation::ALL {
            for _ in 0..1000 {
                let (problem, choices) = generate(op, &mut rng);
                assert!(OPERAND_RANGE.contains(&problem.operand_a));
                assert!(OPERAND_RANGE.contains(&problem.operand_b));
                assert_eq!(Some(problem.answer), op.apply(problem.operand_a, problem.operand_b));
                assert_valid_choices(&problem, &choices);
            }
        }
    }

    #[test]
    fn test_display_text() {
        let mut rng = Pcg32::seed_from_u64(1);
        let (p, _) = generate_with_operands(Operation::Addition, 3, 4, &mut rng).unwrap();
        assert_eq!(p.display_text, "3 + 4");
        assert_eq!(p.answer, Answer::whole(7));

        let (p, _) = generate_with_operands(Operation::Multiplication, 6, 2, &mut rng).unwrap();
        assert_eq!(p.display_text, "6 × 2");

        let (p, _) = generate_with_operands(Operation::Division, 7, 3, &mut rng).unwrap();
        assert_eq!(p.display_text, "7 ÷ 3");
        assert!(!p.answer.is_whole());
    }

    #[test]
    fn test_division_scenario() {
        let mut rng = Pcg32::seed_from_u64(42);
        let (p, choices) = generate_with_operands(Operation::Division, 9, 3, &mut rng).unwrap();
        assert_eq!(p.answer, Answer::whole(3));
        assert!(choices.contains(Answer::whole(3)));
        assert_valid_choices(&p, &choices);
    }

    #[test]
    fn test_non_integer_answer_kept_in_choices() {
        let mut rng = Pcg32::seed_from_u64(3);
        let (p, choices) = generate_with_operands(Operation::Division, 7, 3, &mut rng).unwrap();
        assert!(choices.contains(p.answer));
        assert_valid_choices(&p, &choices);
    }

    #[test]
    fn test_answer_outside_distractor_range() {
        // 10 × 10 = 100 can never collide with a distractor
        let mut rng = Pcg32::seed_from_u64(9);
        let (p, choices) =
            generate_with_operands(Operation::Multiplication, 10, 10, &mut rng).unwrap();
        assert_valid_choices(&p, &choices);
    }

    #[test]
    fn test_division_by_zero_rejected() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(generate_with_operands(Operation::Division, 5, 0, &mut rng).is_none());
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(2024);
        let mut rng2 = Pcg32::seed_from_u64(2024);
        for op in Operation::ALL {
            assert_eq!(generate(op, &mut rng1), generate(op, &mut rng2));
        }
    }

    #[test]
    fn test_shuffle_moves_answer() {
        // Over many rounds the answer must appear in every slot
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; CHOICE_COUNT];
        for _ in 0..200 {
            let (p, choices) = generate(Operation::Addition, &mut rng);
            if let Some(i) = choices.position(p.answer) {
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    proptest! {
        #[test]
        fn prop_choice_set_invariants(seed in any::<u64>(), op_index in 0usize..4) {
            let op = Operation::ALL[op_index];
            let mut rng = Pcg32::seed_from_u64(seed);
            let (problem, choices) = generate(op, &mut rng);
            prop_assert!(OPERAND_RANGE.contains(&problem.operand_a));
            prop_assert!(OPERAND_RANGE.contains(&problem.operand_b));
            prop_assert_eq!(choices.len(), CHOICE_COUNT);
            prop_assert_eq!(choices.iter().filter(|&c| c == problem.answer).count(), 1);
            let mut sorted: Vec<_> = choices.iter().map(|a| (a.numer(), a.denom())).collect();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), CHOICE_COUNT);
        }

        #[test]
        fn prop_forced_operands(a in 1i32..=10, b in 1i32..=10, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for op in Operation::ALL {
                let (problem, choices) = generate_with_operands(op, a, b, &mut rng).unwrap();
                prop_assert_eq!(Some(problem.answer), op.apply(a, b));
                prop_assert!(choices.contains(problem.answer));
            }
        }
    }
}
