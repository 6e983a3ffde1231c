//! Generic testing utilities for state machines.
//!
//! This module provides reusable testing infrastructure for state machines implementing the
//! [`StateMachine`](crate::state_machine::StateMachine) trait.
//!
//! ## Organization
//!
//! - [`transition`] - Value-based transition testing helpers
//! - [`proptest`] - Property-based testing macros
//!
//! ## Value-Based Testing
//!
//! ```rust,ignore
//! use crate::testing::transition::*;
//!
//! test_transition(
//!     create_sm,
//!     get_state,
//!     &cfg,
//!     Transition {
//!         from_state: challenge,
//!         event: ChallengeEvent::Timeout(timeout),
//!         expected_state: Challenge::default(),
//!         expected_duties: vec![duty],
//!         expected_signals: vec![signal],
//!     },
//! );
//! ```
//!
//! ## Property-Based Testing
//!
//! ```rust,ignore
//! use crate::{prop_deterministic, prop_no_silent_acceptance};
//!
//! prop_deterministic!(
//!     Challenge,
//!     create_sm,
//!     get_state,
//!     &test_cfg(),
//!     arb_challenge(),
//!     arb_event()
//! );
//! ```

pub(crate) mod transition;

pub(crate) use transition::{
    test_invalid_transition, test_transition, EventSequence, InvalidTransition, Transition,
};
