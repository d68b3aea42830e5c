use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimesheetError>;

#[derive(Error, Debug)]
pub enum TimesheetError {
    #[error("Invalid repository {}: {reason}", path.display())]
    InvalidRepository { path: PathBuf, reason: String },
    #[error(
        "Cannot analyze shallow clone {}: history is incomplete. Run `git fetch --unshallow` inside it first",
        path.display()
    )]
    IncompleteHistory { path: PathBuf },
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid email alias: {0}")]
    InvalidAlias(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Reference iteration error: {0}")]
    References(#[from] Box<gix::reference::iter::Error>),
    #[error("Reference iteration init error: {0}")]
    ReferencesInit(#[from] Box<gix::reference::iter::init::Error>),
    #[error("Reference peel error: {0}")]
    RefPeel(#[from] Box<gix::reference::peel::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<figment::Error> for TimesheetError {
    fn from(err: figment::Error) -> Self {
        TimesheetError::Config(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for TimesheetError {
    fn from(err: gix::object::commit::Error) -> Self {
        TimesheetError::Commit(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for TimesheetError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        TimesheetError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for TimesheetError {
    fn from(err: gix::objs::decode::Error) -> Self {
        TimesheetError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::reference::iter::Error> for TimesheetError {
    fn from(err: gix::reference::iter::Error) -> Self {
        TimesheetError::References(Box::new(err))
    }
}

impl From<gix::reference::iter::init::Error> for TimesheetError {
    fn from(err: gix::reference::iter::init::Error) -> Self {
        TimesheetError::ReferencesInit(Box::new(err))
    }
}

impl From<gix::reference::peel::Error> for TimesheetError {
    fn from(err: gix::reference::peel::Error) -> Self {
        TimesheetError::RefPeel(Box::new(err))
    }
}
