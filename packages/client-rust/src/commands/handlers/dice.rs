//! Local dice roller for `roll-dice`.
//!
//! Understands simple additive formulas: dice terms (`2d6`, `d20`) and flat
//! modifiers (`+3`, `-1`) joined by `+`/`-`. A formula whose only dice term
//! is a single d20 reports natural 20 and natural 1 through the
//! `isCritical`/`isFumble` flags.

use std::sync::OnceLock;

use anyhow::bail;
use rand::Rng;
use regex::Regex;
use tablebridge_core::messages::{DiceResult, RollDiceParams, RollResult};
use tablebridge_core::CommandKind;
use tracing::debug;

use crate::commands::CommandRouter;

const MAX_DICE_PER_TERM: u32 = 100;
const MAX_SIDES: u32 = 1000;

fn formula_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*[+-]?\s*(?:\d*d\d+|\d+)(?:\s*[+-]\s*(?:\d*d\d+|\d+))*\s*$")
            .expect("valid regex")
    })
}

fn term_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([+-])?\s*(?:(\d*)d(\d+)|(\d+))").expect("valid regex")
    })
}

/// Registers the local `roll-dice` handler on `router`.
pub fn register(router: &CommandRouter) {
    router.register_typed(CommandKind::RollDice, |params: RollDiceParams| async move {
        if let Some(flavor) = &params.flavor {
            debug!(%flavor, formula = %params.formula, "rolling");
        }
        roll_formula(&params.formula)
    });
}

/// Rolls `formula` with the thread-local RNG.
pub fn roll_formula(formula: &str) -> anyhow::Result<RollResult> {
    let mut rng = rand::rng();
    roll_formula_with(formula, |sides| rng.random_range(1..=sides))
}

/// Rolls `formula`, drawing each die from `roll(sides)`.
fn roll_formula_with(
    formula: &str,
    mut roll: impl FnMut(u32) -> u32,
) -> anyhow::Result<RollResult> {
    if !formula_regex().is_match(formula) {
        bail!("Invalid formula: {formula}");
    }

    let mut total: i64 = 0;
    let mut dice = Vec::new();
    let mut d20_rolls: Vec<u32> = Vec::new();

    for term in term_regex().captures_iter(formula) {
        let negative = term.get(1).is_some_and(|sign| sign.as_str() == "-");

        if let Some(sides) = term.get(3) {
            let count: u32 = match term.get(2).map(|m| m.as_str()) {
                None | Some("") => 1,
                Some(raw) => raw.parse()?,
            };
            let sides: u32 = sides.as_str().parse()?;
            if count == 0 || sides == 0 {
                bail!("Invalid formula: {formula}");
            }
            if count > MAX_DICE_PER_TERM || sides > MAX_SIDES {
                bail!("Invalid formula: {formula}");
            }

            let mut results = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let value = roll(sides);
                if sides == 20 {
                    d20_rolls.push(value);
                }
                results.push(i32::try_from(value)?);
                total += if negative {
                    -i64::from(value)
                } else {
                    i64::from(value)
                };
            }
            dice.push(DiceResult {
                die: format!("d{sides}"),
                count,
                results,
            });
        } else if let Some(constant) = term.get(4) {
            let value: i64 = constant.as_str().parse()?;
            total += if negative { -value } else { value };
        }
    }

    // Natural 20/1 detection only applies when the roll is a lone d20,
    // modifiers notwithstanding.
    let (is_critical, is_fumble) = match d20_rolls.as_slice() {
        [value] if dice.iter().map(|group| group.count).sum::<u32>() == 1 => {
            (Some(*value == 20), Some(*value == 1))
        }
        _ => (None, None),
    };

    Ok(RollResult {
        total,
        formula: formula.trim().to_owned(),
        dice,
        is_critical,
        is_fumble,
    })
}
