//! Instruction handlers, grouped by kind.
//!
//! Every handler reads its operands at PC+1/PC+2, leaves PC on the next
//! instruction (or on the branch target) and returns the T-cycles it took.
//! Handlers are wired to opcodes in `table.rs`.

mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
