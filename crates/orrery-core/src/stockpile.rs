//! Checked arithmetic over resource maps.
//!
//! Colony stockpiles, ship cargo, and blueprint costs are all
//! [`Stockpile`]s. Every helper here either succeeds completely or leaves
//! its input untouched: the new map is computed first and only swapped in
//! once every entry has been validated.

use orrery_types::{ResourceKind, Stockpile};
use rust_decimal::Decimal;

use crate::error::ActionError;

/// Sum of all quantities. Returns `None` on overflow.
pub fn total(stock: &Stockpile) -> Option<Decimal> {
    stock
        .values()
        .try_fold(Decimal::ZERO, |acc, qty| acc.checked_add(*qty))
}

/// Quantity held of one kind (zero if absent).
pub fn quantity(stock: &Stockpile, kind: ResourceKind) -> Decimal {
    stock.get(&kind).copied().unwrap_or(Decimal::ZERO)
}

/// Whether `stock` holds at least `cost` of every kind.
pub fn covers(stock: &Stockpile, cost: &Stockpile) -> bool {
    cost.iter().all(|(kind, qty)| quantity(stock, *kind) >= *qty)
}

/// The amounts by which `stock` falls short of `cost`. Empty when covered.
pub fn shortfall(stock: &Stockpile, cost: &Stockpile) -> Stockpile {
    cost.iter()
        .filter_map(|(kind, qty)| {
            let missing = qty.checked_sub(quantity(stock, *kind))?;
            (missing > Decimal::ZERO).then_some((*kind, missing))
        })
        .collect()
}

/// Debit `cost` from `stock` belonging to colony `owner`.
///
/// Entries that reach zero are kept at zero so the colony still lists
/// the resource.
///
/// # Errors
///
/// Returns [`ActionError::InsufficientResources`] if any kind is short;
/// `stock` is unchanged.
pub fn debit(
    stock: &mut Stockpile,
    cost: &Stockpile,
    owner: &orrery_types::WorldId,
) -> Result<(), ActionError> {
    let missing = shortfall(stock, cost);
    if !missing.is_empty() {
        return Err(ActionError::InsufficientResources {
            colony: owner.clone(),
            missing,
        });
    }

    let mut next = stock.clone();
    for (kind, qty) in cost {
        let remaining = quantity(stock, *kind)
            .checked_sub(*qty)
            .ok_or_else(|| ActionError::ArithmeticOverflow {
                context: format!("debit of {kind}"),
            })?;
        next.insert(*kind, remaining);
    }
    *stock = next;
    Ok(())
}

/// Add `amounts` to `stock`.
///
/// # Errors
///
/// Returns [`ActionError::ArithmeticOverflow`] if any sum overflows;
/// `stock` is unchanged.
pub fn credit(stock: &mut Stockpile, amounts: &Stockpile) -> Result<(), ActionError> {
    let mut next = stock.clone();
    for (kind, qty) in amounts {
        let sum = quantity(stock, *kind)
            .checked_add(*qty)
            .ok_or_else(|| ActionError::ArithmeticOverflow {
                context: format!("credit of {kind}"),
            })?;
        next.insert(*kind, sum);
    }
    *stock = next;
    Ok(())
}

/// Render a stockpile as `Fe 12, Si 4` for log messages.
pub fn describe(stock: &Stockpile) -> String {
    if stock.is_empty() {
        return "nothing".to_owned();
    }
    stock
        .iter()
        .map(|(kind, qty)| format!("{kind} {}", qty.normalize()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orrery_types::WorldId;
    use rust_decimal_macros::dec;

    use super::*;

    fn stock(entries: &[(ResourceKind, Decimal)]) -> Stockpile {
        entries.iter().copied().collect()
    }

    #[test]
    fn covers_and_shortfall_agree() {
        let held = stock(&[(ResourceKind::Fe, dec!(10)), (ResourceKind::Si, dec!(10))]);
        let cost = stock(&[(ResourceKind::Fe, dec!(12)), (ResourceKind::Si, dec!(4))]);
        assert!(!covers(&held, &cost));
        assert_eq!(shortfall(&held, &cost), stock(&[(ResourceKind::Fe, dec!(2))]));
    }

    #[test]
    fn failed_debit_leaves_stock_exactly_unchanged() {
        let mut held = stock(&[(ResourceKind::Fe, dec!(10)), (ResourceKind::Si, dec!(10))]);
        let cost = stock(&[(ResourceKind::Fe, dec!(12)), (ResourceKind::Si, dec!(4))]);
        let result = debit(&mut held, &cost, &WorldId::from("earth"));
        assert!(matches!(
            result,
            Err(ActionError::InsufficientResources { .. })
        ));
        assert_eq!(
            held,
            stock(&[(ResourceKind::Fe, dec!(10)), (ResourceKind::Si, dec!(10))])
        );
    }

    #[test]
    fn debit_keeps_zeroed_entries() {
        let mut held = stock(&[(ResourceKind::Fe, dec!(12))]);
        let cost = stock(&[(ResourceKind::Fe, dec!(12))]);
        debit(&mut held, &cost, &WorldId::from("earth")).unwrap();
        assert_eq!(held.get(&ResourceKind::Fe), Some(&Decimal::ZERO));
    }

    #[test]
    fn debit_of_missing_kind_is_short() {
        let mut held = Stockpile::new();
        let cost = stock(&[(ResourceKind::He3, dec!(10))]);
        assert!(debit(&mut held, &cost, &WorldId::from("luna")).is_err());
        assert!(held.is_empty());
    }

    #[test]
    fn credit_adds_fractional_amounts() {
        let mut held = stock(&[(ResourceKind::Ice, dec!(1.5))]);
        credit(&mut held, &stock(&[(ResourceKind::Ice, dec!(0.5)), (ResourceKind::C, dec!(2))]))
            .unwrap();
        assert_eq!(quantity(&held, ResourceKind::Ice), dec!(2.0));
        assert_eq!(quantity(&held, ResourceKind::C), dec!(2));
    }

    #[test]
    fn total_sums_everything() {
        let held = stock(&[(ResourceKind::Fe, dec!(40)), (ResourceKind::Si, dec!(2.5))]);
        assert_eq!(total(&held), Some(dec!(42.5)));
    }

    #[test]
    fn describe_is_readable() {
        let held = stock(&[(ResourceKind::Fe, dec!(12.0)), (ResourceKind::Si, dec!(4))]);
        assert_eq!(describe(&held), "Fe 12, Si 4");
        assert_eq!(describe(&Stockpile::new()), "nothing");
    }
}
