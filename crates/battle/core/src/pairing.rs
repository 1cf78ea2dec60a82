//! Uniform pair sampling over the eligible pool.
use rand::Rng;
use rand::seq::index;

use crate::ids::NameId;
use crate::name::Name;

/// The id and display text of one side of a pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameCard {
    pub id: NameId,
    pub text: String,
}

impl From<&Name> for NameCard {
    fn from(name: &Name) -> Self {
        Self {
            id: name.id,
            text: name.text.clone(),
        }
    }
}

/// Two distinct names to compare next. Order carries no meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pairing {
    pub name1: NameCard,
    pub name2: NameCard,
}

impl Pairing {
    pub fn ids(&self) -> [NameId; 2] {
        [self.name1.id, self.name2.id]
    }

    pub fn contains(&self, name_id: NameId) -> bool {
        self.name1.id == name_id || self.name2.id == name_id
    }
}

/// Draws two distinct names uniformly without replacement.
///
/// Returns `None` when fewer than two names are given.
pub fn draw_pair<R>(eligible: &[&Name], rng: &mut R) -> Option<Pairing>
where
    R: Rng + ?Sized,
{
    if eligible.len() < 2 {
        return None;
    }

    let picks = index::sample(rng, eligible.len(), 2);
    let first = eligible[picks.index(0)];
    let second = eligible[picks.index(1)];

    Some(Pairing {
        name1: NameCard::from(first),
        name2: NameCard::from(second),
    })
}
