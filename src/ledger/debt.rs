//! Outstanding obligations of one player.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A payment owed to one creditor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obligation {
    pub creditor: PlayerId,
    pub amount: u32,
}

/// Debt state of a player.
///
/// `Owed` always holds at least one obligation and at most one per creditor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Debt {
    #[default]
    NoDebt,
    Owed(Vec<Obligation>),
}

impl Debt {
    /// Whether nothing is owed.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        matches!(self, Debt::NoDebt)
    }

    /// Outstanding obligations, oldest creditor first.
    #[must_use]
    pub fn obligations(&self) -> &[Obligation] {
        match self {
            Debt::NoDebt => &[],
            Debt::Owed(list) => list,
        }
    }

    /// Sum owed to every creditor.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.obligations().iter().map(|o| o.amount).sum()
    }

    /// Amount owed to `creditor`, if any.
    #[must_use]
    pub fn owed_to(&self, creditor: PlayerId) -> Option<u32> {
        self.obligations()
            .iter()
            .find(|o| o.creditor == creditor)
            .map(|o| o.amount)
    }

    /// Add to the amount owed to `creditor`. Zero amounts are ignored.
    pub fn add(&mut self, creditor: PlayerId, amount: u32) {
        if amount == 0 {
            return;
        }
        match self {
            Debt::NoDebt => *self = Debt::Owed(vec![Obligation { creditor, amount }]),
            Debt::Owed(list) => match list.iter_mut().find(|o| o.creditor == creditor) {
                Some(existing) => existing.amount += amount,
                None => list.push(Obligation { creditor, amount }),
            },
        }
    }

    /// Drop the obligation to `creditor`, returning the amount it was for.
    pub fn settle(&mut self, creditor: PlayerId) -> Option<u32> {
        let Debt::Owed(list) = self else {
            return None;
        };
        let pos = list.iter().position(|o| o.creditor == creditor)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            *self = Debt::NoDebt;
        }
        Some(removed.amount)
    }
}
