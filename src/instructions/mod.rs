pub mod support;

pub mod arith;
pub mod branch;
pub mod compare;
pub mod fpcvt;
pub mod fpu;
pub mod jump;
pub mod load;
pub mod logic;
pub mod moves;
pub mod muldiv;
pub mod shift;
pub mod store;
pub mod sys;
pub mod syscall;
pub mod trap;

use crate::domain::ports::InstructionHandler;
use std::collections::HashMap;

/// Name → handler registry. Handlers are registered explicitly; the engine
/// looks mnemonics up here while executing.
pub struct InstructionSet {
    handlers: HashMap<&'static str, Box<dyn InstructionHandler>>,
}

impl InstructionSet {
    /// The full instruction set understood by the interpreter.
    pub fn standard() -> Self {
        let mut set = Self {
            handlers: HashMap::new(),
        };

        set.register(Box::new(arith::Add));
        set.register(Box::new(arith::Addi));
        set.register(Box::new(arith::Addiu));
        set.register(Box::new(arith::Sub));

        set.register(Box::new(logic::And));
        set.register(Box::new(logic::Andi));
        set.register(Box::new(logic::Or));
        set.register(Box::new(logic::Ori));
        set.register(Box::new(logic::Nor));
        set.register(Box::new(logic::Xori));

        set.register(Box::new(shift::Sll));
        set.register(Box::new(shift::Srl));
        set.register(Box::new(shift::Sra));

        set.register(Box::new(muldiv::Mult));
        set.register(Box::new(muldiv::Multu));
        set.register(Box::new(muldiv::Div));
        set.register(Box::new(muldiv::Divu));

        set.register(Box::new(compare::Slt));
        set.register(Box::new(compare::Slti));
        set.register(Box::new(compare::Sltu));
        set.register(Box::new(compare::Sltiu));

        set.register(Box::new(branch::Beq));
        set.register(Box::new(branch::Bne));
        set.register(Box::new(branch::Bgez));
        set.register(Box::new(branch::Bgtz));
        set.register(Box::new(branch::Blez));
        set.register(Box::new(branch::Bltz));
        set.register(Box::new(branch::Bltzal));

        set.register(Box::new(jump::J));
        set.register(Box::new(jump::Jal));
        set.register(Box::new(jump::Jr));
        set.register(Box::new(jump::Jalr));

        set.register(Box::new(load::Li));
        set.register(Box::new(load::La));
        set.register(Box::new(load::Lui));
        set.register(Box::new(load::Lw));
        set.register(Box::new(load::Lb));
        set.register(Box::new(load::Lh));
        set.register(Box::new(load::Lwl));
        set.register(Box::new(load::Lwr));
        set.register(Box::new(load::Ll));
        set.register(Box::new(load::Lwc1));
        set.register(Box::new(load::Ldc1));

        set.register(Box::new(store::Sb));
        set.register(Box::new(store::Sh));
        set.register(Box::new(store::Sw));
        set.register(Box::new(store::Swl));
        set.register(Box::new(store::Swr));
        set.register(Box::new(store::Sc));
        set.register(Box::new(store::Swc1));
        set.register(Box::new(store::Sdc1));

        set.register(Box::new(moves::Move));
        set.register(Box::new(moves::Mfhi));
        set.register(Box::new(moves::Mflo));
        set.register(Box::new(moves::Movz));
        set.register(Box::new(moves::Movn));
        set.register(Box::new(moves::MovfD));

        set.register(Box::new(fpu::AddS));
        set.register(Box::new(fpu::AddD));
        set.register(Box::new(fpu::SubS));
        set.register(Box::new(fpu::SubD));
        set.register(Box::new(fpu::MulS));
        set.register(Box::new(fpu::MulD));
        set.register(Box::new(fpu::DivS));
        set.register(Box::new(fpu::DivD));
        set.register(Box::new(fpu::AbsS));
        set.register(Box::new(fpu::AbsD));
        set.register(Box::new(fpu::SqrtS));
        set.register(Box::new(fpu::SqrtD));
        set.register(Box::new(fpu::CEqS));
        set.register(Box::new(fpu::CEqD));

        set.register(Box::new(fpcvt::CvtWD));
        set.register(Box::new(fpcvt::FloorWS));
        set.register(Box::new(fpcvt::FloorWD));
        set.register(Box::new(fpcvt::CeilWS));
        set.register(Box::new(fpcvt::RoundWS));
        set.register(Box::new(fpcvt::TruncWD));

        set.register(Box::new(trap::Teqi));
        set.register(Box::new(trap::Tnei));
        set.register(Box::new(trap::Tne));
        set.register(Box::new(trap::Tgeiu));

        set.register(Box::new(sys::Nop));
        set.register(Box::new(sys::Break));
        set.register(Box::new(sys::Eret));
        set.register(Box::new(syscall::Syscall));

        set
    }

    fn register(&mut self, handler: Box<dyn InstructionHandler>) {
        let name = handler.name();
        let previous = self.handlers.insert(name, handler);
        debug_assert!(previous.is_none(), "duplicate handler for {}", name);
    }

    pub fn get(&self, name: &str) -> Option<&dyn InstructionHandler> {
        self.handlers.get(name).map(|handler| handler.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn mnemonics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }
}
