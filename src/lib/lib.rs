pub mod automaton;
pub mod batch;
pub mod config;
pub mod error;
pub mod trace;
pub mod validation;
pub mod validator;
