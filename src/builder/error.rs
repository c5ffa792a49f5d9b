//! Build errors for machine construction.

use thiserror::Error;

/// Errors raised while turning a topology descriptor into a machine.
///
/// All of these are structural: they describe a malformed declaration,
/// never a runtime condition. Construction aborts on the first violation
/// found.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("two states are named `{0}`; state names must be unique across the machine")]
    DuplicateStateIdentifier(String),

    #[error("state `{0}` tags two children as initial; only one initial child is permitted")]
    AlreadyHasInitial(String),

    #[error("state `{0}` is not parallel and has no initial child; tag one child with .initial()")]
    NoInitialState(String),

    #[error("a transition targets a state named `{0}` which does not exist in the machine")]
    NoSuchState(String),

    #[error("a transition declares two targets; only one .to() per transition is allowed")]
    TargetAlreadySpecified,

    #[error("a transition declares two actions; only one .action() per transition is allowed")]
    ActionAlreadySpecified,

    #[error("a transition declares two guards; only one .when() per transition is allowed")]
    ConditionAlreadySpecified,

    #[error("a transition declares two events; only one .on() per transition is allowed")]
    EventAlreadySpecified,
}
