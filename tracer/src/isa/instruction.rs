//! Instruction field extraction.
//!
//! Vector instructions reuse the base R-type positions for their register
//! fields (`vd`/`vs3` in bits 11:7, `vs1`/`rs1` in 19:15, `vs2`/`rs2` in
//! 24:20) and add `vm` (bit 25) and `funct6` (31:26). Loads and stores
//! repurpose the upper bits as `nf`, `mew` and `mop`.

/// Bit-field accessors for a raw 32-bit instruction.
pub trait InstructionBits {
    fn opcode(&self) -> u32;
    fn rd(&self) -> usize;
    fn rs1(&self) -> usize;
    fn rs2(&self) -> usize;
    fn funct3(&self) -> u32;
    fn funct6(&self) -> u32;
    /// Mask bit: 0 means the operation is masked by `v0`.
    fn vm(&self) -> bool;
    fn mop(&self) -> u32;
    fn mew(&self) -> bool;
    fn nf(&self) -> u32;
    /// Sign-extended 5-bit immediate in the `rs1` position.
    fn simm5(&self) -> i32;
    /// Sign-extended 12-bit I-type immediate.
    fn imm_i(&self) -> i32;
    /// Sign-extended 12-bit S-type immediate.
    fn imm_s(&self) -> i32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & 0x7f
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> 7) & 0x1f) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> 15) & 0x1f) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> 20) & 0x1f) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & 0x7
    }

    #[inline(always)]
    fn funct6(&self) -> u32 {
        (self >> 26) & 0x3f
    }

    #[inline(always)]
    fn vm(&self) -> bool {
        (self >> 25) & 0x1 != 0
    }

    #[inline(always)]
    fn mop(&self) -> u32 {
        (self >> 26) & 0x3
    }

    #[inline(always)]
    fn mew(&self) -> bool {
        (self >> 28) & 0x1 != 0
    }

    #[inline(always)]
    fn nf(&self) -> u32 {
        (self >> 29) & 0x7
    }

    #[inline(always)]
    fn simm5(&self) -> i32 {
        ((self.rs1() as i32) << 27) >> 27
    }

    #[inline(always)]
    fn imm_i(&self) -> i32 {
        (*self as i32) >> 20
    }

    #[inline(always)]
    fn imm_s(&self) -> i32 {
        (((*self as i32) >> 25) << 5) | ((self >> 7) & 0x1f) as i32
    }
}
