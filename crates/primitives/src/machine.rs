//! Minimal model of the WASM machine, just enough to commit to its state.
//!
//! The challenge protocol never executes the machine. It only needs to produce the same hash the
//! one-step prover computes for a freshly started machine and for the halted end states.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    errors::MachineHashError,
    hash::{keccak256, keccak256_packed},
    types::Bytes32,
};

/// Execution status of a machine.
///
/// The discriminants are part of the commitment format and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MachineStatus {
    /// The machine is still executing.
    Running = 0,
    /// The machine reached the end of the block cleanly.
    Finished = 1,
    /// The machine hit an unrecoverable error.
    Errored = 2,
    /// The machine is waiting for input that is not yet available.
    Blocked = 3,
    /// The machine tried to read past the end of the available inbox.
    TooFar = 4,
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            MachineStatus::Running => "Running",
            MachineStatus::Finished => "Finished",
            MachineStatus::Errored => "Errored",
            MachineStatus::Blocked => "Blocked",
            MachineStatus::TooFar => "TooFar",
        };
        write!(f, "{}", status_str)
    }
}

/// Type tag of a machine value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ValueType {
    /// 32-bit integer.
    I32 = 0,
    /// 64-bit integer.
    I64 = 1,
    /// 32-bit float.
    F32 = 2,
    /// 64-bit float.
    F64 = 3,
    /// Null reference.
    RefNull = 4,
    /// Function reference.
    FuncRef = 5,
    /// Reference internal to the machine.
    InternalRef = 6,
    /// Marker separating call frames on the value stack.
    StackBoundary = 7,
}

/// A single typed value. `contents` is a 256-bit word in the commitment, of which only the low
/// bits are ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    /// The type tag.
    pub value_type: ValueType,
    /// The raw contents.
    pub contents: u64,
}

impl Value {
    /// A null reference.
    pub const fn ref_null() -> Self {
        Self {
            value_type: ValueType::RefNull,
            contents: 0,
        }
    }

    /// A 32-bit integer value.
    pub const fn i32(value: u32) -> Self {
        Self {
            value_type: ValueType::I32,
            contents: value as u64,
        }
    }

    /// Commitment to this value.
    pub fn hash(&self) -> Bytes32 {
        keccak256_packed(&[
            b"Value:",
            &[self.value_type as u8],
            Bytes32::from_u64_be(self.contents).as_ref(),
        ])
    }
}

/// A value stack of which the top values are known and the rest is summarized by a hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueStack {
    /// The explicitly known values, bottom first.
    pub proved: Vec<Value>,
    /// Hash of everything below `proved`.
    pub remaining_hash: Bytes32,
}

impl ValueStack {
    /// Commitment to the stack.
    pub fn hash(&self) -> Bytes32 {
        self.proved.iter().fold(self.remaining_hash, |acc, value| {
            keccak256_packed(&[b"Value stack:", value.hash().as_ref(), acc.as_ref()])
        })
    }
}

/// A call frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    /// Where execution resumes on return.
    pub return_pc: Value,
    /// Merkle root of the frame's locals.
    pub locals_merkle_root: Bytes32,
    /// Index of the calling module.
    pub caller_module: u32,
    /// Internals offset of the calling module.
    pub caller_module_internals: u32,
}

impl StackFrame {
    /// Commitment to the frame.
    pub fn hash(&self) -> Bytes32 {
        keccak256_packed(&[
            b"Stack frame:",
            self.return_pc.hash().as_ref(),
            self.locals_merkle_root.as_ref(),
            &self.caller_module.to_be_bytes(),
            &self.caller_module_internals.to_be_bytes(),
        ])
    }
}

/// The known top of the frame stack plus a hash of the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrameWindow {
    /// The explicitly known frames, bottom first.
    pub proved: Vec<StackFrame>,
    /// Hash of everything below `proved`.
    pub remaining_hash: Bytes32,
}

impl StackFrameWindow {
    /// Commitment to the frame stack.
    pub fn hash(&self) -> Bytes32 {
        self.proved.iter().fold(self.remaining_hash, |acc, frame| {
            keccak256_packed(&[b"Stack frame stack:", frame.hash().as_ref(), acc.as_ref()])
        })
    }
}

/// The committed state of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Machine {
    /// Execution status.
    pub status: MachineStatus,
    /// The value stack.
    pub value_stack: ValueStack,
    /// The internal stack.
    pub internal_stack: ValueStack,
    /// The call frames.
    pub frame_stack: StackFrameWindow,
    /// Commitment to the global state the machine operates on.
    pub global_state_hash: Bytes32,
    /// Currently executing module.
    pub module_idx: u32,
    /// Currently executing function within the module.
    pub function_idx: u32,
    /// Program counter within the function.
    pub function_pc: u32,
    /// Merkle root of all loaded modules.
    pub modules_root: Bytes32,
}

impl Machine {
    /// The machine right before executing the entrypoint of `modules_root` over the given global
    /// state.
    ///
    /// The value stack carries the entrypoint call ABI: a null function reference followed by two
    /// zero `i32`s.
    pub fn start(global_state_hash: Bytes32, modules_root: Bytes32) -> Self {
        Self {
            status: MachineStatus::Running,
            value_stack: ValueStack {
                proved: vec![Value::ref_null(), Value::i32(0), Value::i32(0)],
                remaining_hash: Bytes32::ZERO,
            },
            internal_stack: ValueStack::default(),
            frame_stack: StackFrameWindow::default(),
            global_state_hash,
            module_idx: 0,
            function_idx: 0,
            function_pc: 0,
            modules_root,
        }
    }

    /// Commitment to the machine as if it were running, regardless of its status.
    pub(crate) fn running_hash(&self) -> Bytes32 {
        keccak256_packed(&[
            b"Machine running:",
            self.value_stack.hash().as_ref(),
            self.internal_stack.hash().as_ref(),
            self.frame_stack.hash().as_ref(),
            self.global_state_hash.as_ref(),
            &self.module_idx.to_be_bytes(),
            &self.function_idx.to_be_bytes(),
            &self.function_pc.to_be_bytes(),
            self.modules_root.as_ref(),
        ])
    }

    /// Commitment to the machine.
    ///
    /// Halted machines commit only to what outlives them: a finished machine to its global state,
    /// errored and too-far machines to nothing but their status.
    pub fn hash(&self) -> Result<Bytes32, MachineHashError> {
        match self.status {
            MachineStatus::Running => Ok(self.running_hash()),
            MachineStatus::Finished => Ok(keccak256_packed(&[
                b"Machine finished:",
                self.global_state_hash.as_ref(),
            ])),
            MachineStatus::Errored => Ok(keccak256(b"Machine errored:")),
            MachineStatus::TooFar => Ok(keccak256(b"Machine too far:")),
            MachineStatus::Blocked => Err(MachineHashError::InvalidStatus(self.status)),
        }
    }
}
