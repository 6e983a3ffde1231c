//! Testing utilities specific to the Challenge State Machine.
//!
//! This module provides fixtures, helpers to replay rounds from emitted signals and proptest
//! strategies shared by the transition tests.


use challenge_params::prelude::ChallengeParams;
use challenge_primitives::{
    global_state::GlobalState,
    machine::MachineStatus,
    state_hash::hash_block_state,
    types::{Address, Bytes32, CallContext, Timestamp},
};
use proptest::prelude::*;

use crate::{
    challenge::{
        duties::ChallengeDuty,
        events::{
            BisectEvent, ChallengeEvent, ChallengeExecutionEvent, ClearEvent, CreateChallenge,
            OneStepProvedEvent, TimeoutEvent,
        },
        machine::ChallengeOutput,
        signals::ChallengeSignal,
        state::{Challenge, ChallengeMode, Participant},
    },
    errors::ChallengeError,
    segments::SegmentSelection,
    state_machine::StateMachine,
    testing::{test_invalid_transition, test_transition, InvalidTransition, Transition},
};

// ===== Test Constants =====

/// The party defending the end state.
pub(super) const ASSERTER: Address = Address::new([0xaa; 20]);
/// The party disputing the end state.
pub(super) const CHALLENGER: Address = Address::new([0xcc; 20]);
/// Someone who takes no part in the challenge.
pub(super) const OUTSIDER: Address = Address::new([0xee; 20]);
/// The machine binary both parties execute.
pub(super) const WASM_MODULE_ROOT: Bytes32 = Bytes32::new([0x77; 32]);
/// When the challenge is created.
pub(super) const CREATED_AT: Timestamp = 1_000;
/// Initial clock of the asserter.
pub(super) const ASSERTER_TIME: Timestamp = 500;
/// Initial clock of the challenger.
pub(super) const CHALLENGER_TIME: Timestamp = 400;
/// When the challenger splits the disputed range into single blocks.
pub(super) const SPLIT_AT: Timestamp = CREATED_AT + 50;
/// When the asserter escalates the contested block.
pub(super) const ESCALATED_AT: Timestamp = SPLIT_AT + 20;
/// When the challenger splits the contested block into single steps.
pub(super) const STEPS_SPLIT_AT: Timestamp = ESCALATED_AT + 30;
/// The block the asserter contests after the split.
pub(super) const CONTESTED_BLOCK: u64 = 3;
/// Number of machine steps the asserter claims the contested block takes.
pub(super) const NUM_STEPS: u64 = 40;
/// The end of the disputed range as claimed by the challenger.
pub(super) const CHALLENGER_END: u64 = 1_000_000;
/// The end of the contested block as claimed by the asserter.
pub(super) const ASSERTER_BLOCK_END: u64 = 2_000_000;
// every fixture move fits within the mover's clock
const _: () = assert!(STEPS_SPLIT_AT - CREATED_AT - (ESCALATED_AT - SPLIT_AT) < CHALLENGER_TIME);
const _: () = assert!(ESCALATED_AT - SPLIT_AT < ASSERTER_TIME);

// ===== Helpers =====

pub(super) fn test_cfg() -> ChallengeParams {
    ChallengeParams::default()
}

pub(super) const fn create_sm(state: Challenge) -> Challenge {
    state
}

pub(super) const fn get_state(sm: &Challenge) -> &Challenge {
    sm
}

/// Tests a single accepted transition of a challenge under the default parameters.
pub(super) fn test_challenge_transition(
    transition: Transition<Challenge, ChallengeEvent, ChallengeDuty, ChallengeSignal>,
) {
    test_transition::<Challenge, _, _, _, _, _, _, _>(create_sm, get_state, &test_cfg(), transition);
}

/// Tests that a challenge rejects an event under the default parameters and stays untouched.
pub(super) fn test_challenge_invalid_transition(
    invalid: InvalidTransition<Challenge, ChallengeEvent, ChallengeError>,
) {
    test_invalid_transition::<Challenge, _, _, _, _, _, _, _>(
        create_sm,
        get_state,
        &test_cfg(),
        invalid,
    );
}

pub(super) const fn ctx(sender: Address, timestamp: Timestamp) -> CallContext {
    CallContext::new(sender, timestamp)
}

/// A global state that is unique per `n`.
pub(super) fn global_state(n: u64) -> GlobalState {
    GlobalState::new(Bytes32::from_u64_be(n), Bytes32::new([0x5e; 32]), n, 0)
}

/// The block state of a machine that finished cleanly at `global_state(n)`.
pub(super) fn finished_block(n: u64) -> Bytes32 {
    hash_block_state(MachineStatus::Finished, global_state(n).hash())
        .expect("finished block states are hashable")
}

pub(super) fn create_args(statuses: [MachineStatus; 2], num_blocks: u64) -> CreateChallenge {
    CreateChallenge {
        wasm_module_root: WASM_MODULE_ROOT,
        start_and_end_machine_statuses: statuses,
        start_and_end_global_states: [global_state(0), global_state(num_blocks)],
        num_blocks,
        asserter: ASSERTER,
        challenger: CHALLENGER,
        asserter_time_left: ASSERTER_TIME,
        challenger_time_left: CHALLENGER_TIME,
    }
}

/// Creates a block challenge over `num_blocks` blocks that both start and end finished, and
/// returns it together with the selection of its only segment.
pub(super) fn new_challenge(num_blocks: u64) -> (Challenge, SegmentSelection) {
    let (challenge, output) = Challenge::create(
        &ctx(ASSERTER, CREATED_AT),
        create_args(
            [MachineStatus::Finished, MachineStatus::Finished],
            num_blocks,
        ),
    )
    .expect("challenge must be created");

    let selection = select(&output.signals, 0);
    (challenge, selection)
}

/// Selects `position` in the last round committed among `signals`.
pub(super) fn select<'a>(
    signals: impl IntoIterator<Item = &'a ChallengeSignal>,
    position: u64,
) -> SegmentSelection {
    signals
        .into_iter()
        .filter_map(|signal| match signal {
            ChallengeSignal::Bisected {
                segments_start,
                segments_length,
                segments,
                ..
            } => Some(SegmentSelection {
                old_segments_start: *segments_start,
                old_segments_length: *segments_length,
                old_segments: segments.clone(),
                challenge_position: position,
            }),
            _ => None,
        })
        .last()
        .expect("signals must commit a round")
}

/// A split of the segment contested by `selection` into `degree` parts that agrees with its start
/// and disputes its end.
pub(super) fn disputing_split(selection: &SegmentSelection, degree: usize) -> Vec<Bytes32> {
    let start = selection.start_hash().expect("valid selection");
    let end = selection.end_hash().expect("valid selection");

    let mut segments = vec![start];
    segments.extend((1..=degree as u64).map(|i| Bytes32::from_u64_be(0xd15c_0000 + i)));
    assert_ne!(segments.last(), Some(&end));

    segments
}

pub(super) fn bisect(
    sender: Address,
    timestamp: Timestamp,
    selection: SegmentSelection,
    new_segments: Vec<Bytes32>,
) -> ChallengeEvent {
    ChallengeEvent::Bisect(BisectEvent {
        ctx: ctx(sender, timestamp),
        selection,
        new_segments,
    })
}

/// A block challenge over `num_blocks` blocks that the challenger has split into single blocks,
/// disputing the end of the range. The asserter is on the clock.
pub(super) fn split_into_blocks(num_blocks: u64) -> (Challenge, ChallengeOutput) {
    let (mut challenge, selection) = new_challenge(num_blocks);

    let mut segments: Vec<Bytes32> = (0..num_blocks).map(finished_block).collect();
    segments.push(finished_block(CHALLENGER_END));

    let output = challenge
        .process_event(&test_cfg(), bisect(CHALLENGER, SPLIT_AT, selection, segments))
        .expect("split must be accepted");

    (challenge, output)
}

pub(super) fn challenge_execution(
    sender: Address,
    timestamp: Timestamp,
    selection: SegmentSelection,
    machine_statuses: [MachineStatus; 2],
    global_state_hashes: [Bytes32; 2],
    num_steps: u64,
) -> ChallengeEvent {
    ChallengeEvent::ChallengeExecution(ChallengeExecutionEvent {
        ctx: ctx(sender, timestamp),
        selection,
        machine_statuses,
        global_state_hashes,
        num_steps,
    })
}

/// The asserter's escalation of [`CONTESTED_BLOCK`], claiming the block finishes at a different
/// global state than the challenger's split says.
pub(super) fn asserter_escalation(split: &ChallengeOutput) -> ChallengeEvent {
    challenge_execution(
        ASSERTER,
        ESCALATED_AT,
        select(&split.signals, CONTESTED_BLOCK),
        [MachineStatus::Finished, MachineStatus::Finished],
        [
            global_state(CONTESTED_BLOCK).hash(),
            global_state(ASSERTER_BLOCK_END).hash(),
        ],
        NUM_STEPS,
    )
}

/// An execution challenge over [`NUM_STEPS`] steps that the challenger has split into single
/// steps. The asserter is on the clock.
pub(super) fn split_into_steps() -> (Challenge, ChallengeOutput) {
    let (mut challenge, split) = split_into_blocks(8);
    let escalated = challenge
        .process_event(&test_cfg(), asserter_escalation(&split))
        .expect("escalation must be accepted");

    let selection = select(&escalated.signals, 0);
    let new_segments = disputing_split(&selection, NUM_STEPS as usize);
    let output = challenge
        .process_event(
            &test_cfg(),
            bisect(CHALLENGER, STEPS_SPLIT_AT, selection, new_segments),
        )
        .expect("step split must be accepted");

    (challenge, output)
}

pub(super) fn one_step_proved(
    sender: Address,
    timestamp: Timestamp,
    selection: SegmentSelection,
    after_hash: Bytes32,
) -> ChallengeEvent {
    ChallengeEvent::OneStepProved(OneStepProvedEvent {
        ctx: ctx(sender, timestamp),
        selection,
        after_hash,
    })
}

// ===== Strategies =====

pub(super) fn arb_address() -> impl Strategy<Value = Address> {
    prop_oneof![Just(ASSERTER), Just(CHALLENGER), Just(OUTSIDER)]
}

pub(super) fn arb_bytes32() -> impl Strategy<Value = Bytes32> {
    prop_oneof![
        Just(Bytes32::ZERO),
        any::<[u8; 32]>().prop_map(Bytes32::new)
    ]
}

pub(super) fn arb_status() -> impl Strategy<Value = MachineStatus> {
    prop_oneof![
        Just(MachineStatus::Running),
        Just(MachineStatus::Finished),
        Just(MachineStatus::Errored),
        Just(MachineStatus::Blocked),
        Just(MachineStatus::TooFar),
    ]
}

pub(super) fn arb_mode() -> impl Strategy<Value = ChallengeMode> {
    prop_oneof![
        Just(ChallengeMode::None),
        Just(ChallengeMode::Block),
        Just(ChallengeMode::Execution),
    ]
}

pub(super) fn arb_ctx() -> impl Strategy<Value = CallContext> {
    (arb_address(), 0u64..3_000).prop_map(|(sender, timestamp)| ctx(sender, timestamp))
}

pub(super) fn arb_selection() -> impl Strategy<Value = SegmentSelection> {
    (
        0u64..100,
        0u64..100,
        prop::collection::vec(arb_bytes32(), 0..5),
        0u64..5,
    )
        .prop_map(|(start, length, segments, position)| SegmentSelection {
            old_segments_start: start,
            old_segments_length: length,
            old_segments: segments,
            challenge_position: position,
        })
}

pub(super) fn arb_challenge_in(
    mode: impl Strategy<Value = ChallengeMode>,
) -> impl Strategy<Value = Challenge> {
    (
        arb_address(),
        arb_address(),
        0u64..1_000,
        0u64..1_000,
        0u64..2_000,
        arb_bytes32(),
        mode,
    )
        .prop_map(
            |(current, next, current_time, next_time, last_move, state_hash, mode)| Challenge {
                current: Participant::new(current, current_time),
                next: Participant::new(next, next_time),
                last_move_timestamp: last_move,
                wasm_module_root: WASM_MODULE_ROOT,
                challenge_state_hash: state_hash,
                max_inbox_messages: 1,
                mode,
            },
        )
}

pub(super) fn arb_challenge() -> impl Strategy<Value = Challenge> {
    arb_challenge_in(arb_mode())
}

pub(super) fn arb_event() -> impl Strategy<Value = ChallengeEvent> {
    prop_oneof![
        (
            arb_ctx(),
            arb_selection(),
            prop::collection::vec(arb_bytes32(), 0..10)
        )
            .prop_map(|(ctx, selection, new_segments)| {
                ChallengeEvent::Bisect(BisectEvent {
                    ctx,
                    selection,
                    new_segments,
                })
            }),
        (
            arb_ctx(),
            arb_selection(),
            (arb_status(), arb_status()),
            (arb_bytes32(), arb_bytes32()),
            0u64..100
        )
            .prop_map(|(ctx, selection, statuses, hashes, num_steps)| {
                ChallengeEvent::ChallengeExecution(ChallengeExecutionEvent {
                    ctx,
                    selection,
                    machine_statuses: [statuses.0, statuses.1],
                    global_state_hashes: [hashes.0, hashes.1],
                    num_steps,
                })
            }),
        (arb_ctx(), arb_selection(), arb_bytes32()).prop_map(|(ctx, selection, after_hash)| {
            ChallengeEvent::OneStepProved(OneStepProvedEvent {
                ctx,
                selection,
                after_hash,
            })
        }),
        arb_ctx().prop_map(|ctx| ChallengeEvent::Timeout(TimeoutEvent { ctx })),
        arb_ctx().prop_map(|ctx| ChallengeEvent::Clear(ClearEvent { ctx })),
    ]
}
