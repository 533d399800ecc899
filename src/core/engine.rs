use crate::core::diagnostics::Diagnostics;
use crate::core::memory::MainMemory;
use crate::core::registers::{Cp0Registers, FpRegisters, IntRegisters};
use crate::domain::model::{DataType, ExitStatus, Instruction, Operand, Variable};
use crate::domain::ports::Console;
use crate::instructions::InstructionSet;
use crate::utils::error::Result;
use std::collections::HashMap;

/// The machine: register files, main memory, label table, and the control
/// state handlers mutate through the methods below.
///
/// Control flow is expressed as a pending next-PC: handlers request a
/// target, and the execute loop consumes it after the instruction finishes
/// (falling back to `pc + 1`). `$ra` always holds the index of the
/// instruction following a call site, and `jr`/`jalr` resume exactly at the
/// requested index.
pub struct Evaluator {
    int_registers: IntRegisters,
    fp_registers: FpRegisters,
    cp0_registers: Cp0Registers,
    memory: MainMemory,
    labels: HashMap<String, usize>,
    variable_addresses: HashMap<String, i32>,
    pc: usize,
    next_pc: Option<usize>,
    fp_condition_flag: bool,
    ll_bit: bool,
    heap_pointer: i32,
    exit_code: Option<i32>,
    debug: bool,
    diagnostics: Diagnostics,
    console: Box<dyn Console>,
}

impl Evaluator {
    pub fn new(
        memory_size: usize,
        debug: bool,
        console: Box<dyn Console>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            int_registers: IntRegisters::new(),
            fp_registers: FpRegisters::new(),
            cp0_registers: Cp0Registers::new(),
            memory: MainMemory::new(memory_size),
            labels: HashMap::new(),
            variable_addresses: HashMap::new(),
            pc: 0,
            next_pc: None,
            fp_condition_flag: false,
            ll_bit: false,
            heap_pointer: 0,
            exit_code: None,
            debug,
            diagnostics,
            console,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn memory(&self) -> &MainMemory {
        &self.memory
    }

    // ------------------------------------------------
    // Registers
    // ------------------------------------------------

    pub fn has_int_register(&self, name: &str) -> bool {
        self.int_registers.contains(name)
    }

    pub fn has_fp_register(&self, name: &str) -> bool {
        self.fp_registers.contains(name)
    }

    pub fn register_value(&mut self, operand: &Operand) -> i32 {
        match self.int_registers.get(operand.value()) {
            Some(value) => value,
            None => {
                self.diagnostics
                    .error(format!("Unknown register: {}", operand.value()));
                0
            }
        }
    }

    pub fn set_register_value(&mut self, operand: &Operand, value: i32) {
        if self.debug {
            tracing::debug!("Setting {} to {}", operand.value(), value);
        }
        if !self.int_registers.set(operand.value(), value) {
            self.diagnostics
                .error(format!("Unknown register: {}", operand.value()));
        }
    }

    pub fn fp_register_value(&mut self, operand: &Operand) -> f64 {
        match self.fp_registers.get(operand.value()) {
            Some(value) => value,
            None => {
                self.diagnostics
                    .error(format!("Unknown FP register: {}", operand.value()));
                0.0
            }
        }
    }

    pub fn set_fp_register_value(&mut self, operand: &Operand, value: f64) {
        if self.debug {
            tracing::debug!("Setting {} to {}", operand.value(), value);
        }
        if !self.fp_registers.set(operand.value(), value) {
            self.diagnostics
                .error(format!("Unknown FP register: {}", operand.value()));
        }
    }

    pub fn cp0_register_value(&mut self, operand: &Operand) -> i32 {
        match self.cp0_registers.get(operand.value()) {
            Some(value) => value,
            None => {
                self.diagnostics
                    .error(format!("Unknown CP0 register: {}", operand.value()));
                0
            }
        }
    }

    pub fn set_cp0_register_value(&mut self, operand: &Operand, value: i32) {
        if !self.cp0_registers.set(operand.value(), value) {
            self.diagnostics
                .error(format!("Unknown CP0 register: {}", operand.value()));
        }
    }

    pub fn fp_condition_flag(&self) -> bool {
        self.fp_condition_flag
    }

    pub fn set_fp_condition_flag(&mut self, value: bool) {
        self.fp_condition_flag = value;
    }

    // ------------------------------------------------
    // Control flow
    // ------------------------------------------------

    pub fn current_pc(&self) -> usize {
        self.pc
    }

    /// Index of the instruction after the one currently executing; the value
    /// `jal`/`bltzal` store in `$ra`.
    pub fn return_address(&self) -> i32 {
        (self.pc + 1) as i32
    }

    pub fn jump_to_label(&mut self, label: &str) {
        match self.labels.get(label) {
            Some(&target) => {
                if self.debug {
                    tracing::debug!("Transferring control to label {} at {}", label, target);
                }
                self.next_pc = Some(target);
            }
            None => {
                self.diagnostics.error(format!("Label not found: {}", label));
            }
        }
    }

    pub fn jump_to_register(&mut self, operand: &Operand) {
        let target = self.register_value(operand);
        if target < 0 {
            self.diagnostics
                .error(format!("Invalid jump target in {}: {}", operand.value(), target));
            return;
        }
        if self.debug {
            tracing::debug!("Jumping to {} at {}", operand.value(), target);
        }
        self.next_pc = Some(target as usize);
    }

    /// `eret`: resume after the instruction recorded in `$epc`.
    pub fn resume_from_epc(&mut self) {
        let epc = self.cp0_register_value(&Operand::new("$epc"));
        if epc < 0 {
            self.diagnostics
                .error(format!("Invalid return address in $epc: {}", epc));
            return;
        }
        self.next_pc = Some(epc as usize + 1);
    }

    pub fn request_exit(&mut self, code: i32) {
        if self.exit_code.is_none() {
            if self.debug {
                tracing::debug!("Exit requested with code {}", code);
            }
            self.exit_code = Some(code);
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_code.is_some()
    }

    // ------------------------------------------------
    // Memory
    // ------------------------------------------------

    fn note_fault<T>(&mut self, result: Result<T>, fallback: T) -> T {
        match result {
            Ok(value) => value,
            Err(e) => {
                self.diagnostics.error(e.to_string());
                fallback
            }
        }
    }

    pub fn store_byte(&mut self, address: i32, value: i8) {
        let result = self.memory.store_byte(address, value);
        self.note_fault(result, ());
    }

    pub fn load_byte(&mut self, address: i32) -> i8 {
        let result = self.memory.load_byte(address);
        self.note_fault(result, 0)
    }

    pub fn store_half_word(&mut self, address: i32, value: i16) {
        let result = self.memory.store_half_word(address, value);
        self.note_fault(result, ());
    }

    pub fn load_half_word(&mut self, address: i32) -> i16 {
        let result = self.memory.load_half_word(address);
        self.note_fault(result, 0)
    }

    pub fn store_word(&mut self, address: i32, value: i32) {
        if self.debug {
            tracing::debug!("Storing word {} at {}", value, address);
        }
        let result = self.memory.store_word(address, value);
        self.note_fault(result, ());
    }

    pub fn load_word(&mut self, address: i32) -> i32 {
        let result = self.memory.load_word(address);
        self.note_fault(result, 0)
    }

    pub fn store_double_word(&mut self, address: i32, value: i64) {
        let result = self.memory.store_double_word(address, value);
        self.note_fault(result, ());
    }

    pub fn load_double_word(&mut self, address: i32) -> i64 {
        let result = self.memory.load_double_word(address);
        self.note_fault(result, 0)
    }

    pub fn store_float(&mut self, address: i32, value: f32) {
        let result = self.memory.store_float(address, value);
        self.note_fault(result, ());
    }

    pub fn load_float(&mut self, address: i32) -> f32 {
        let result = self.memory.load_float(address);
        self.note_fault(result, 0.0)
    }

    pub fn store_word_left(&mut self, address: i32, value: i32) {
        let result = self.memory.store_word_left(address, value).map(|_| ());
        self.note_fault(result, ());
    }

    pub fn store_word_right(&mut self, address: i32, value: i32) {
        let result = self.memory.store_word_right(address, value).map(|_| ());
        self.note_fault(result, ());
    }

    pub fn load_word_left(&mut self, address: i32) -> i32 {
        let result = self.memory.load_word_left(address);
        self.note_fault(result, 0)
    }

    pub fn load_word_right(&mut self, address: i32) -> i32 {
        let result = self.memory.load_word_right(address);
        self.note_fault(result, 0)
    }

    /// `ll`: load the word and set the link bit.
    pub fn load_linked(&mut self, target: &Operand, address: i32) {
        let value = self.load_word(address);
        self.ll_bit = true;
        self.set_register_value(target, value);
    }

    /// `sc`: store only if the link bit survived; the target register
    /// receives 1 on success, 0 on failure.
    pub fn store_conditional(&mut self, target: &Operand, address: i32) {
        if self.ll_bit {
            let value = self.register_value(target);
            self.store_word(address, value);
            self.ll_bit = false;
            self.set_register_value(target, 1);
        } else {
            self.set_register_value(target, 0);
        }
    }

    pub fn clear_ll_bit(&mut self) {
        self.ll_bit = false;
    }

    // ------------------------------------------------
    // Data segment & addressing
    // ------------------------------------------------

    pub fn variable_address(&mut self, name: &str) -> Option<i32> {
        let address = self.variable_addresses.get(name).copied();
        if address.is_none() {
            self.diagnostics
                .error(format!("Variable not found: {}", name));
        }
        address
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variable_addresses.contains_key(name)
    }

    pub fn load_address(&mut self, target: &Operand, address: i32) {
        if self.debug {
            tracing::debug!("Loading address {} into {}", address, target.value());
        }
        self.set_register_value(target, address);
    }

    /// Resolves an address operand: a bare variable name, an absolute
    /// integer, or the `disp(reg)` / `var(reg)` displacement form.
    pub fn resolve_address(&mut self, operand: &Operand) -> Option<i32> {
        let text = operand.value();

        if let (Some(open), Some(close)) = (text.find('('), text.find(')')) {
            if open < close {
                let base = Operand::new(&text[open + 1..close]);
                let base_value = self.register_value(&base);
                let displacement = &text[..open];
                let offset = if displacement.is_empty() {
                    0
                } else if let Ok(value) = displacement.parse::<i32>() {
                    value
                } else {
                    self.variable_address(displacement)?
                };
                return Some(base_value.wrapping_add(offset));
            }
        }

        if let Some(value) = operand.parse_int() {
            return Some(value);
        }

        self.variable_address(text)
    }

    /// Lays the `.data` declarations out in declaration order and seeds the
    /// heap pointer past the data segment.
    pub fn initialize_variables(&mut self, variables: &[Variable]) {
        let mut cursor: i32 = 0;

        for var in variables {
            self.variable_addresses.insert(var.name.clone(), cursor);

            match var.ty {
                DataType::Word => {
                    let value = self.parse_literal::<i32>(var);
                    self.store_word(cursor, value);
                    cursor += 4;
                }
                DataType::Byte => {
                    let value = self.parse_literal::<i8>(var);
                    self.store_byte(cursor, value);
                    cursor += 1;
                }
                DataType::Half => {
                    let value = self.parse_literal::<i16>(var);
                    self.store_half_word(cursor, value);
                    cursor += 2;
                }
                DataType::Float => {
                    let value = self.parse_literal::<f32>(var);
                    self.store_float(cursor, value);
                    cursor += 4;
                }
                DataType::Double => {
                    let value = self.parse_literal::<f64>(var);
                    self.store_double_word(cursor, value.to_bits() as i64);
                    cursor += 8;
                }
                DataType::Ascii | DataType::Asciiz => {
                    let text = var.value.replace('"', "");
                    for byte in text.bytes() {
                        self.store_byte(cursor, byte as i8);
                        cursor += 1;
                    }
                    if var.is(DataType::Asciiz) {
                        self.store_byte(cursor, 0);
                        cursor += 1;
                    }
                }
                DataType::Space => {
                    let size = self.parse_literal::<i32>(var).max(0);
                    for _ in 0..size {
                        self.store_byte(cursor, 0);
                        cursor += 1;
                    }
                }
            }

            if self.debug {
                tracing::debug!(
                    "Initialized variable \"{}\" of type \"{:?}\" ending at {}",
                    var.name,
                    var.ty,
                    cursor
                );
            }
        }

        // Heap begins word-aligned after the data segment.
        self.heap_pointer = (cursor + 3) & !3;
    }

    fn parse_literal<T: std::str::FromStr + Default>(&mut self, var: &Variable) -> T {
        match var.value.parse() {
            Ok(value) => value,
            Err(_) => {
                self.diagnostics.error(format!(
                    "Invalid value for {}: {}",
                    var.ty.keyword(),
                    var.value
                ));
                T::default()
            }
        }
    }

    /// Bump allocation for the `sbrk` syscall. Returns the address of the
    /// allocated block, word-aligning the heap pointer afterwards.
    pub fn allocate_heap(&mut self, bytes: i32) -> Option<i32> {
        let start = self.heap_pointer;
        let end = start.checked_add(bytes)?;
        if end as usize > self.memory.size() {
            self.diagnostics.error(format!(
                "sbrk allocation does not fit in memory: {} bytes at {}",
                bytes, start
            ));
            return None;
        }
        self.heap_pointer = (end + 3) & !3;
        Some(start)
    }

    // ------------------------------------------------
    // Console
    // ------------------------------------------------

    pub fn print_line(&mut self, text: &str) {
        self.console.print_line(text);
    }

    pub fn read_input_line(&mut self) -> std::io::Result<Option<String>> {
        self.console.read_line()
    }

    pub fn read_input_char(&mut self) -> std::io::Result<Option<char>> {
        self.console.read_char()
    }

    // ------------------------------------------------
    // Execution
    // ------------------------------------------------

    fn process_labels(&mut self, instructions: &[Instruction]) {
        for (at, instruction) in instructions.iter().enumerate() {
            if let Some(label) = instruction.label() {
                if self.debug {
                    tracing::debug!("Label {} at {}", label, at);
                }
                self.labels.insert(label.to_string(), at);
            }
        }
    }

    pub fn evaluate(&mut self, instructions: &[Instruction], set: &InstructionSet) -> ExitStatus {
        self.process_labels(instructions);
        self.pc = 0;

        while self.pc < instructions.len() {
            if self.exit_requested() {
                break;
            }

            let instruction = &instructions[self.pc];
            if !instruction.is_label() {
                self.execute_instruction(instruction, set);
            }

            if self.exit_requested() {
                break;
            }

            self.pc = match self.next_pc.take() {
                Some(target) => target,
                None => self.pc + 1,
            };
        }

        ExitStatus {
            code: self.exit_code.unwrap_or(0),
        }
    }

    fn execute_instruction(&mut self, instruction: &Instruction, set: &InstructionSet) {
        match set.get(&instruction.name) {
            Some(handler) => {
                handler.execute(&instruction.operands, self);
                if self.debug {
                    let v0 = self.register_value(&Operand::new("$v0"));
                    tracing::debug!("{}: register $v0 = {}", instruction.name, v0);
                }
            }
            None => {
                self.diagnostics
                    .error(format!("Instruction not supported: {}", instruction.name));
            }
        }
    }
}
