//! Application services
//!
//! Services orchestrate the domain state and the ports. They are the only
//! writers of shared state: all mutation funnels through their mutexes, so
//! interleaved async continuations never race.

pub mod auth_session;
pub mod chat_manager;
