//! Major opcodes and minor function codes used by the vector extension.

/// Vector loads and scalar floating-point loads.
pub const OP_LOAD_FP: u32 = 0b000_0111;
/// Vector stores and scalar floating-point stores.
pub const OP_STORE_FP: u32 = 0b010_0111;
/// Vector arithmetic and configuration.
pub const OP_V: u32 = 0b101_0111;

/// `funct3` categories of `OP_V`.
pub mod funct3 {
    pub const OPIVV: u32 = 0b000;
    pub const OPFVV: u32 = 0b001;
    pub const OPMVV: u32 = 0b010;
    pub const OPIVI: u32 = 0b011;
    pub const OPIVX: u32 = 0b100;
    pub const OPFVF: u32 = 0b101;
    pub const OPMVX: u32 = 0b110;
    pub const OPCFG: u32 = 0b111;
}

/// `mop` addressing modes of vector loads and stores.
pub mod mop {
    pub const UNIT_STRIDE: u32 = 0b00;
    pub const INDEXED_UNORDERED: u32 = 0b01;
    pub const STRIDED: u32 = 0b10;
    pub const INDEXED_ORDERED: u32 = 0b11;
}

/// `lumop`/`sumop` variants of unit-stride accesses (the `rs2` field).
pub mod umop {
    pub const NORMAL: usize = 0b0_0000;
    pub const WHOLE_REGISTER: usize = 0b0_1000;
    pub const MASK: usize = 0b0_1011;
    pub const FAULT_ONLY_FIRST: usize = 0b1_0000;
}
