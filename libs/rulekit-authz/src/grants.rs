//! Grant-table types handed over by the authorization-decision component.

use indexmap::IndexMap;

/// Ordered map from rule-type id to the grant computed for it.
///
/// Insertion order is preserved and fixes the clause order of compiled
/// filters, so the same table always compiles to the same query.
pub type AuthorizedRuleTypes = IndexMap<String, RuleTypeGrant>;

/// Consumers authorized for a single rule type.
///
/// A consumer is authorized by being present in the map; the privilege flags
/// do not currently change the compiled filter shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RuleTypeGrant {
    pub authorized_consumers: IndexMap<String, ConsumerPrivileges>,
}

impl RuleTypeGrant {
    /// Grant for the given consumers, each with full privileges.
    #[must_use]
    pub fn for_consumers<I, S>(consumers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authorized_consumers: consumers
                .into_iter()
                .map(|consumer| (consumer.into(), ConsumerPrivileges::full()))
                .collect(),
        }
    }
}

/// Capability record attached to an authorized consumer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConsumerPrivileges {
    pub read: bool,
    pub all: bool,
}

impl ConsumerPrivileges {
    #[must_use]
    pub const fn full() -> Self {
        Self {
            read: true,
            all: true,
        }
    }

    #[must_use]
    pub const fn read_only() -> Self {
        Self {
            read: true,
            all: false,
        }
    }
}
