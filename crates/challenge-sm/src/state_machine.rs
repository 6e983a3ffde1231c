//! Generic state machine infrastructure.
//!
//! This module provides the output type and the trait that the challenge state machine
//! implements, so that callers and the test harness can drive it uniformly.

/// Generic output from a state machine after processing an event.
///
/// - `duties`: actions that need to be executed externally
/// - `signals`: notifications about what the transition did
///
/// # Type Parameters
///
/// - `D`: The duty type specific to the state machine
/// - `S`: The signal type specific to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SMOutput<D, S> {
    /// The duties that need to be performed by external executors.
    pub duties: Vec<D>,
    /// The signals emitted by the transition.
    pub signals: Vec<S>,
}

impl<D, S> SMOutput<D, S> {
    /// Creates an output with only signals.
    pub const fn with_signals(signals: Vec<S>) -> Self {
        Self {
            duties: Vec::new(),
            signals,
        }
    }

    /// Creates an output with both duties and signals.
    pub const fn with_duties_and_signals(duties: Vec<D>, signals: Vec<S>) -> Self {
        Self { duties, signals }
    }
}

/// Trait for state machines that advance in response to discrete events.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Challenge {
///     type Config = ChallengeParams;
///     type Duty = ChallengeDuty;
///     type OutgoingSignal = ChallengeSignal;
///     type Event = ChallengeEvent;
///     type Error = ChallengeError;
///
///     fn process_event(&mut self, cfg: &Self::Config, event: Self::Event)
///         -> Result<SMOutput<Self::Duty, Self::OutgoingSignal>, Self::Error>
///     {
///         // Implementation
///     }
/// }
/// ```
pub trait StateMachine {
    /// The static configuration every transition is evaluated against.
    type Config;

    /// The type of duties this state machine can emit.
    type Duty;

    /// The type of signals this state machine can emit.
    type OutgoingSignal;

    /// The type of events this state machine can process.
    type Event;

    /// The error type returned when event processing fails.
    type Error;

    /// Processes an event and returns the output (duties and signals) or an error.
    ///
    /// Implementations must leave the state untouched when returning an error.
    fn process_event(
        &mut self,
        cfg: &Self::Config,
        event: Self::Event,
    ) -> Result<SMOutput<Self::Duty, Self::OutgoingSignal>, Self::Error>;
}
