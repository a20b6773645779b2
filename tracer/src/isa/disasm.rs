//! Vector instruction disassembler.
//!
//! Produces the node labels shown by the graph renderer. The output follows
//! the RVV 1.0 assembler syntax closely enough to be read at a glance, but
//! the only hard requirement is that it is deterministic and total: every
//! 32-bit word gets a label, and encodings outside the tables below get an
//! `unknown (0x........)` placeholder carrying the raw word.

use super::abi::{freg, vreg, xreg};
use super::instruction::InstructionBits;
use super::opcodes::{self, funct3, mop, umop};
use crate::arch::VtypeLayout;

/// Label used for encodings the disassembler does not recognize.
pub fn unknown(inst: u32) -> String {
    format!("unknown ({:#010x})", inst)
}

/// Disassembles `inst` with the default `vtype` layout.
pub fn disassemble(inst: u32) -> String {
    Disassembler::default().disassemble(inst)
}

/// Vector disassembler parameterized by the `vtype` layout used to render
/// the immediate of `vsetvli`/`vsetivli`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disassembler {
    layout: VtypeLayout,
}

impl Disassembler {
    pub fn new(layout: VtypeLayout) -> Self {
        Self { layout }
    }

    pub fn disassemble(&self, inst: u32) -> String {
        let text = match inst.opcode() {
            opcodes::OP_V => self.vector_op(inst),
            opcodes::OP_LOAD_FP => load(inst),
            opcodes::OP_STORE_FP => store(inst),
            _ => None,
        };
        text.unwrap_or_else(|| unknown(inst))
    }

    fn vector_op(&self, inst: u32) -> Option<String> {
        match inst.funct3() {
            funct3::OPCFG => self.config(inst),
            funct3::OPIVV => opi(inst, Operand::V),
            funct3::OPIVX => opi(inst, Operand::X),
            funct3::OPIVI => opi(inst, Operand::I),
            funct3::OPMVV => opm(inst, Operand::V),
            funct3::OPMVX => opm(inst, Operand::X),
            funct3::OPFVV => opf(inst, Operand::V),
            funct3::OPFVF => opf(inst, Operand::F),
            _ => None,
        }
    }

    fn config(&self, inst: u32) -> Option<String> {
        let rd = xreg(inst.rd());
        if inst >> 31 == 0 {
            let zimm = u64::from((inst >> 20) & 0x7ff);
            Some(format!(
                "vsetvli {}, {}, {}",
                rd,
                xreg(inst.rs1()),
                self.vtypei(zimm)
            ))
        } else if (inst >> 30) & 0x3 == 0b11 {
            let zimm = u64::from((inst >> 20) & 0x3ff);
            Some(format!(
                "vsetivli {}, {}, {}",
                rd,
                inst.rs1(),
                self.vtypei(zimm)
            ))
        } else if (inst >> 25) & 0x7f == 0b100_0000 {
            Some(format!(
                "vsetvl {}, {}, {}",
                rd,
                xreg(inst.rs1()),
                xreg(inst.rs2())
            ))
        } else {
            None
        }
    }

    fn vtypei(&self, zimm: u64) -> String {
        let fields = self.layout.decode(zimm);
        format!(
            "{}, {}, {}, {}",
            fields.vsew.mnemonic(),
            fields.vlmul.mnemonic(),
            if fields.vta { "ta" } else { "tu" },
            if fields.vma { "ma" } else { "mu" }
        )
    }
}

/// Kind of the first source operand, selected by `funct3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operand {
    V,
    X,
    I,
    F,
}

impl Operand {
    fn bit(self) -> u8 {
        match self {
            Operand::V => FV,
            Operand::X | Operand::F => FX,
            Operand::I => FI,
        }
    }

    fn suffix(self) -> char {
        match self {
            Operand::V => 'v',
            Operand::X => 'x',
            Operand::I => 'i',
            Operand::F => 'f',
        }
    }

    fn render(self, inst: u32, unsigned_imm: bool) -> String {
        match self {
            Operand::V => vreg(inst.rs1()),
            Operand::X => xreg(inst.rs1()).to_string(),
            Operand::F => freg(inst.rs1()).to_string(),
            Operand::I if unsigned_imm => inst.rs1().to_string(),
            Operand::I => inst.simm5().to_string(),
        }
    }
}

const FV: u8 = 0b001;
const FX: u8 = 0b010;
const FI: u8 = 0b100;
const VX: u8 = FV | FX;
const VXI: u8 = FV | FX | FI;
const XI: u8 = FX | FI;

/// Operand layout of a table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    /// `op.v? vd, vs2, op1`
    Binary,
    /// `op.w? vd, vs2, op1` (narrowing, or widening with a wide source)
    Wide,
    /// `op.vs vd, vs2, vs1`
    Reduce,
    /// `op.v? vd, op1, vs2`
    MulAdd,
    /// `op.mm vd, vs2, vs1`, never masked
    MaskLogic,
    /// `op.v?m vd, vs2, op1, v0`, mask bit must be clear
    CarryIn,
    /// `op.v?m vd, vs2, op1, v0` or unmasked `op.v? vd, vs2, op1`
    CarryOut,
}

#[derive(Clone, Copy, Debug)]
struct Op {
    name: &'static str,
    shape: Shape,
    forms: u8,
    unsigned_imm: bool,
}

const fn op(name: &'static str, shape: Shape, forms: u8) -> Op {
    Op {
        name,
        shape,
        forms,
        unsigned_imm: false,
    }
}

const fn op_u(name: &'static str, shape: Shape, forms: u8) -> Op {
    Op {
        name,
        shape,
        forms,
        unsigned_imm: true,
    }
}

fn mask(inst: u32) -> &'static str {
    if inst.vm() {
        ""
    } else {
        ", v0.t"
    }
}

fn render(inst: u32, operand: Operand, entry: Op) -> Option<String> {
    if entry.forms & operand.bit() == 0 {
        return None;
    }
    let vd = vreg(inst.rd());
    let vs2 = vreg(inst.rs2());
    let op1 = operand.render(inst, entry.unsigned_imm);
    let s = operand.suffix();
    let m = mask(inst);

    let text = match entry.shape {
        Shape::Binary => format!("{}.v{} {}, {}, {}{}", entry.name, s, vd, vs2, op1, m),
        Shape::Wide => format!("{}.w{} {}, {}, {}{}", entry.name, s, vd, vs2, op1, m),
        Shape::Reduce => format!("{}.vs {}, {}, {}{}", entry.name, vd, vs2, op1, m),
        Shape::MulAdd => format!("{}.v{} {}, {}, {}{}", entry.name, s, vd, op1, vs2, m),
        Shape::MaskLogic => {
            if !inst.vm() {
                return None;
            }
            format!("{}.mm {}, {}, {}", entry.name, vd, vs2, op1)
        }
        Shape::CarryIn => {
            if inst.vm() {
                return None;
            }
            format!("{}.v{}m {}, {}, {}, v0", entry.name, s, vd, vs2, op1)
        }
        Shape::CarryOut => {
            if inst.vm() {
                format!("{}.v{} {}, {}, {}", entry.name, s, vd, vs2, op1)
            } else {
                format!("{}.v{}m {}, {}, {}, v0", entry.name, s, vd, vs2, op1)
            }
        }
    };
    Some(text)
}

fn opi(inst: u32, operand: Operand) -> Option<String> {
    let f6 = inst.funct6();
    match (f6, operand) {
        (0b010111, _) => return merge_or_move(inst, operand, "vmerge", "vmv"),
        (0b001110, Operand::V) => {
            return render(inst, operand, op("vrgatherei16", Shape::Binary, FV))
        }
        (0b100111, Operand::I) => {
            let nr = inst.rs1() + 1;
            if !inst.vm() || !matches!(nr, 1 | 2 | 4 | 8) {
                return None;
            }
            return Some(format!(
                "vmv{}r.v {}, {}",
                nr,
                vreg(inst.rd()),
                vreg(inst.rs2())
            ));
        }
        _ => {}
    }

    let entry = match f6 {
        0b000000 => op("vadd", Shape::Binary, VXI),
        0b000010 => op("vsub", Shape::Binary, VX),
        0b000011 => op("vrsub", Shape::Binary, XI),
        0b000100 => op("vminu", Shape::Binary, VX),
        0b000101 => op("vmin", Shape::Binary, VX),
        0b000110 => op("vmaxu", Shape::Binary, VX),
        0b000111 => op("vmax", Shape::Binary, VX),
        0b001001 => op("vand", Shape::Binary, VXI),
        0b001010 => op("vor", Shape::Binary, VXI),
        0b001011 => op("vxor", Shape::Binary, VXI),
        0b001100 => op_u("vrgather", Shape::Binary, VXI),
        0b001110 => op_u("vslideup", Shape::Binary, XI),
        0b001111 => op_u("vslidedown", Shape::Binary, XI),
        0b010000 => op("vadc", Shape::CarryIn, VXI),
        0b010001 => op("vmadc", Shape::CarryOut, VXI),
        0b010010 => op("vsbc", Shape::CarryIn, VX),
        0b010011 => op("vmsbc", Shape::CarryOut, VX),
        0b011000 => op("vmseq", Shape::Binary, VXI),
        0b011001 => op("vmsne", Shape::Binary, VXI),
        0b011010 => op("vmsltu", Shape::Binary, VX),
        0b011011 => op("vmslt", Shape::Binary, VX),
        0b011100 => op("vmsleu", Shape::Binary, VXI),
        0b011101 => op("vmsle", Shape::Binary, VXI),
        0b011110 => op("vmsgtu", Shape::Binary, XI),
        0b011111 => op("vmsgt", Shape::Binary, XI),
        0b100000 => op("vsaddu", Shape::Binary, VXI),
        0b100001 => op("vsadd", Shape::Binary, VXI),
        0b100010 => op("vssubu", Shape::Binary, VX),
        0b100011 => op("vssub", Shape::Binary, VX),
        0b100101 => op_u("vsll", Shape::Binary, VXI),
        0b100111 => op("vsmul", Shape::Binary, VX),
        0b101000 => op_u("vsrl", Shape::Binary, VXI),
        0b101001 => op_u("vsra", Shape::Binary, VXI),
        0b101010 => op_u("vssrl", Shape::Binary, VXI),
        0b101011 => op_u("vssra", Shape::Binary, VXI),
        0b101100 => op_u("vnsrl", Shape::Wide, VXI),
        0b101101 => op_u("vnsra", Shape::Wide, VXI),
        0b101110 => op_u("vnclipu", Shape::Wide, VXI),
        0b101111 => op_u("vnclip", Shape::Wide, VXI),
        0b110000 => op("vwredsumu", Shape::Reduce, FV),
        0b110001 => op("vwredsum", Shape::Reduce, FV),
        _ => return None,
    };
    render(inst, operand, entry)
}

/// `vmerge`/`vfmerge` when masked, `vmv.v.*`/`vfmv.v.f` when unmasked.
fn merge_or_move(inst: u32, operand: Operand, merge: &str, mv: &str) -> Option<String> {
    let vd = vreg(inst.rd());
    let op1 = operand.render(inst, false);
    let s = operand.suffix();
    if !inst.vm() {
        Some(format!(
            "{}.v{}m {}, {}, {}, v0",
            merge,
            s,
            vd,
            vreg(inst.rs2()),
            op1
        ))
    } else if inst.rs2() == 0 {
        Some(format!("{}.v.{} {}, {}", mv, s, vd, op1))
    } else {
        None
    }
}

fn opm(inst: u32, operand: Operand) -> Option<String> {
    let f6 = inst.funct6();
    let vd = vreg(inst.rd());
    let vs2 = vreg(inst.rs2());
    let m = mask(inst);

    match (f6, operand) {
        (0b010000, Operand::V) => {
            return match inst.rs1() {
                0b00000 if inst.vm() => Some(format!("vmv.x.s {}, {}", xreg(inst.rd()), vs2)),
                0b10000 => Some(format!("vcpop.m {}, {}{}", xreg(inst.rd()), vs2, m)),
                0b10001 => Some(format!("vfirst.m {}, {}{}", xreg(inst.rd()), vs2, m)),
                _ => None,
            };
        }
        (0b010000, _) => {
            return (inst.rs2() == 0 && inst.vm())
                .then(|| format!("vmv.s.x {}, {}", vd, xreg(inst.rs1())));
        }
        (0b010010, Operand::V) => {
            let name = match inst.rs1() {
                0b00010 => "vzext.vf8",
                0b00011 => "vsext.vf8",
                0b00100 => "vzext.vf4",
                0b00101 => "vsext.vf4",
                0b00110 => "vzext.vf2",
                0b00111 => "vsext.vf2",
                _ => return None,
            };
            return Some(format!("{} {}, {}{}", name, vd, vs2, m));
        }
        (0b010100, Operand::V) => {
            let name = match inst.rs1() {
                0b00001 => "vmsbf.m",
                0b00010 => "vmsof.m",
                0b00011 => "vmsif.m",
                0b10000 => "viota.m",
                0b10001 if inst.rs2() == 0 => return Some(format!("vid.v {}{}", vd, m)),
                _ => return None,
            };
            return Some(format!("{} {}, {}{}", name, vd, vs2, m));
        }
        (0b010111, Operand::V) => {
            return inst
                .vm()
                .then(|| format!("vcompress.vm {}, {}, {}", vd, vs2, vreg(inst.rs1())));
        }
        _ => {}
    }

    let entry = match f6 {
        0b000000 => op("vredsum", Shape::Reduce, FV),
        0b000001 => op("vredand", Shape::Reduce, FV),
        0b000010 => op("vredor", Shape::Reduce, FV),
        0b000011 => op("vredxor", Shape::Reduce, FV),
        0b000100 => op("vredminu", Shape::Reduce, FV),
        0b000101 => op("vredmin", Shape::Reduce, FV),
        0b000110 => op("vredmaxu", Shape::Reduce, FV),
        0b000111 => op("vredmax", Shape::Reduce, FV),
        0b001000 => op("vaaddu", Shape::Binary, VX),
        0b001001 => op("vaadd", Shape::Binary, VX),
        0b001010 => op("vasubu", Shape::Binary, VX),
        0b001011 => op("vasub", Shape::Binary, VX),
        0b001110 => op("vslide1up", Shape::Binary, FX),
        0b001111 => op("vslide1down", Shape::Binary, FX),
        0b011000 => op("vmandn", Shape::MaskLogic, FV),
        0b011001 => op("vmand", Shape::MaskLogic, FV),
        0b011010 => op("vmor", Shape::MaskLogic, FV),
        0b011011 => op("vmxor", Shape::MaskLogic, FV),
        0b011100 => op("vmorn", Shape::MaskLogic, FV),
        0b011101 => op("vmnand", Shape::MaskLogic, FV),
        0b011110 => op("vmnor", Shape::MaskLogic, FV),
        0b011111 => op("vmxnor", Shape::MaskLogic, FV),
        0b100000 => op("vdivu", Shape::Binary, VX),
        0b100001 => op("vdiv", Shape::Binary, VX),
        0b100010 => op("vremu", Shape::Binary, VX),
        0b100011 => op("vrem", Shape::Binary, VX),
        0b100100 => op("vmulhu", Shape::Binary, VX),
        0b100101 => op("vmul", Shape::Binary, VX),
        0b100110 => op("vmulhsu", Shape::Binary, VX),
        0b100111 => op("vmulh", Shape::Binary, VX),
        0b101001 => op("vmadd", Shape::MulAdd, VX),
        0b101011 => op("vnmsub", Shape::MulAdd, VX),
        0b101101 => op("vmacc", Shape::MulAdd, VX),
        0b101111 => op("vnmsac", Shape::MulAdd, VX),
        0b110000 => op("vwaddu", Shape::Binary, VX),
        0b110001 => op("vwadd", Shape::Binary, VX),
        0b110010 => op("vwsubu", Shape::Binary, VX),
        0b110011 => op("vwsub", Shape::Binary, VX),
        0b110100 => op("vwaddu", Shape::Wide, VX),
        0b110101 => op("vwadd", Shape::Wide, VX),
        0b110110 => op("vwsubu", Shape::Wide, VX),
        0b110111 => op("vwsub", Shape::Wide, VX),
        0b111000 => op("vwmulu", Shape::Binary, VX),
        0b111010 => op("vwmulsu", Shape::Binary, VX),
        0b111011 => op("vwmul", Shape::Binary, VX),
        0b111100 => op("vwmaccu", Shape::MulAdd, VX),
        0b111101 => op("vwmacc", Shape::MulAdd, VX),
        0b111110 => op("vwmaccus", Shape::MulAdd, FX),
        0b111111 => op("vwmaccsu", Shape::MulAdd, VX),
        _ => return None,
    };
    render(inst, operand, entry)
}

fn opf(inst: u32, operand: Operand) -> Option<String> {
    let f6 = inst.funct6();
    let vd = vreg(inst.rd());
    let vs2 = vreg(inst.rs2());
    let m = mask(inst);

    match (f6, operand) {
        (0b010000, Operand::V) => {
            return (inst.rs1() == 0 && inst.vm())
                .then(|| format!("vfmv.f.s {}, {}", freg(inst.rd()), vs2));
        }
        (0b010000, _) => {
            return (inst.rs2() == 0 && inst.vm())
                .then(|| format!("vfmv.s.f {}, {}", vd, freg(inst.rs1())));
        }
        (0b010010, Operand::V) => {
            let name = match inst.rs1() {
                0b00000 => "vfcvt.xu.f.v",
                0b00001 => "vfcvt.x.f.v",
                0b00010 => "vfcvt.f.xu.v",
                0b00011 => "vfcvt.f.x.v",
                0b00110 => "vfcvt.rtz.xu.f.v",
                0b00111 => "vfcvt.rtz.x.f.v",
                0b01000 => "vfwcvt.xu.f.v",
                0b01001 => "vfwcvt.x.f.v",
                0b01010 => "vfwcvt.f.xu.v",
                0b01011 => "vfwcvt.f.x.v",
                0b01100 => "vfwcvt.f.f.v",
                0b01110 => "vfwcvt.rtz.xu.f.v",
                0b01111 => "vfwcvt.rtz.x.f.v",
                0b10000 => "vfncvt.xu.f.w",
                0b10001 => "vfncvt.x.f.w",
                0b10010 => "vfncvt.f.xu.w",
                0b10011 => "vfncvt.f.x.w",
                0b10100 => "vfncvt.f.f.w",
                0b10101 => "vfncvt.rod.f.f.w",
                0b10110 => "vfncvt.rtz.xu.f.w",
                0b10111 => "vfncvt.rtz.x.f.w",
                _ => return None,
            };
            return Some(format!("{} {}, {}{}", name, vd, vs2, m));
        }
        (0b010011, Operand::V) => {
            let name = match inst.rs1() {
                0b00000 => "vfsqrt.v",
                0b00100 => "vfrsqrt7.v",
                0b00101 => "vfrec7.v",
                0b10000 => "vfclass.v",
                _ => return None,
            };
            return Some(format!("{} {}, {}{}", name, vd, vs2, m));
        }
        (0b010111, Operand::F) => return merge_or_move(inst, operand, "vfmerge", "vfmv"),
        _ => {}
    }

    let entry = match f6 {
        0b000000 => op("vfadd", Shape::Binary, VX),
        0b000001 => op("vfredusum", Shape::Reduce, FV),
        0b000010 => op("vfsub", Shape::Binary, VX),
        0b000011 => op("vfredosum", Shape::Reduce, FV),
        0b000100 => op("vfmin", Shape::Binary, VX),
        0b000101 => op("vfredmin", Shape::Reduce, FV),
        0b000110 => op("vfmax", Shape::Binary, VX),
        0b000111 => op("vfredmax", Shape::Reduce, FV),
        0b001000 => op("vfsgnj", Shape::Binary, VX),
        0b001001 => op("vfsgnjn", Shape::Binary, VX),
        0b001010 => op("vfsgnjx", Shape::Binary, VX),
        0b001110 => op("vfslide1up", Shape::Binary, FX),
        0b001111 => op("vfslide1down", Shape::Binary, FX),
        0b011000 => op("vmfeq", Shape::Binary, VX),
        0b011001 => op("vmfle", Shape::Binary, VX),
        0b011011 => op("vmflt", Shape::Binary, VX),
        0b011100 => op("vmfne", Shape::Binary, VX),
        0b011101 => op("vmfgt", Shape::Binary, FX),
        0b011111 => op("vmfge", Shape::Binary, FX),
        0b100000 => op("vfdiv", Shape::Binary, VX),
        0b100001 => op("vfrdiv", Shape::Binary, FX),
        0b100100 => op("vfmul", Shape::Binary, VX),
        0b100111 => op("vfrsub", Shape::Binary, FX),
        0b101000 => op("vfmadd", Shape::MulAdd, VX),
        0b101001 => op("vfnmadd", Shape::MulAdd, VX),
        0b101010 => op("vfmsub", Shape::MulAdd, VX),
        0b101011 => op("vfnmsub", Shape::MulAdd, VX),
        0b101100 => op("vfmacc", Shape::MulAdd, VX),
        0b101101 => op("vfnmacc", Shape::MulAdd, VX),
        0b101110 => op("vfmsac", Shape::MulAdd, VX),
        0b101111 => op("vfnmsac", Shape::MulAdd, VX),
        0b110000 => op("vfwadd", Shape::Binary, VX),
        0b110001 => op("vfwredusum", Shape::Reduce, FV),
        0b110010 => op("vfwsub", Shape::Binary, VX),
        0b110011 => op("vfwredosum", Shape::Reduce, FV),
        0b110100 => op("vfwadd", Shape::Wide, VX),
        0b110110 => op("vfwsub", Shape::Wide, VX),
        0b111000 => op("vfwmul", Shape::Binary, VX),
        0b111100 => op("vfwmacc", Shape::MulAdd, VX),
        0b111101 => op("vfwnmacc", Shape::MulAdd, VX),
        0b111110 => op("vfwmsac", Shape::MulAdd, VX),
        0b111111 => op("vfwnmsac", Shape::MulAdd, VX),
        _ => return None,
    };
    render(inst, operand, entry)
}

/// Element width of a vector memory access, from the `width` field.
fn vector_eew(width: u32) -> Option<u32> {
    match width {
        0b000 => Some(8),
        0b101 => Some(16),
        0b110 => Some(32),
        0b111 => Some(64),
        _ => None,
    }
}

/// Scalar floating-point access suffix sharing the LOAD-FP/STORE-FP opcodes.
fn scalar_fp_suffix(width: u32) -> Option<char> {
    match width {
        0b001 => Some('h'),
        0b010 => Some('w'),
        0b011 => Some('d'),
        0b100 => Some('q'),
        _ => None,
    }
}

fn load(inst: u32) -> Option<String> {
    let width = inst.funct3();
    if let Some(sz) = scalar_fp_suffix(width) {
        return Some(format!(
            "fl{} {}, {}({})",
            sz,
            freg(inst.rd()),
            inst.imm_i(),
            xreg(inst.rs1())
        ));
    }
    let eew = vector_eew(width)?;
    if inst.mew() {
        return None;
    }
    memory_access(inst, eew, 'l', vreg(inst.rd()))
}

fn store(inst: u32) -> Option<String> {
    let width = inst.funct3();
    if let Some(sz) = scalar_fp_suffix(width) {
        return Some(format!(
            "fs{} {}, {}({})",
            sz,
            freg(inst.rs2()),
            inst.imm_s(),
            xreg(inst.rs1())
        ));
    }
    let eew = vector_eew(width)?;
    if inst.mew() {
        return None;
    }
    memory_access(inst, eew, 's', vreg(inst.rd()))
}

/// Shared rendering of vector loads (`dir == 'l'`) and stores (`'s'`).
fn memory_access(inst: u32, eew: u32, dir: char, data: String) -> Option<String> {
    let fields = inst.nf() + 1;
    let base = xreg(inst.rs1());
    let m = mask(inst);
    let seg = |stem: &str, tail: &str| {
        if fields == 1 {
            format!("v{}{}{}", dir, stem, tail)
        } else {
            format!("v{}{}seg{}{}", dir, stem, fields, tail)
        }
    };

    match inst.mop() {
        mop::UNIT_STRIDE => match inst.rs2() {
            umop::NORMAL => {
                let name = seg("", &format!("e{}.v", eew));
                Some(format!("{} {}, ({}){}", name, data, base, m))
            }
            umop::FAULT_ONLY_FIRST if dir == 'l' => {
                let name = seg("", &format!("e{}ff.v", eew));
                Some(format!("{} {}, ({}){}", name, data, base, m))
            }
            umop::WHOLE_REGISTER => {
                if !inst.vm() || !matches!(fields, 1 | 2 | 4 | 8) {
                    return None;
                }
                let name = if dir == 'l' {
                    format!("vl{}re{}.v", fields, eew)
                } else if eew == 8 {
                    format!("vs{}r.v", fields)
                } else {
                    return None;
                };
                Some(format!("{} {}, ({})", name, data, base))
            }
            umop::MASK => {
                if !inst.vm() || fields != 1 || eew != 8 {
                    return None;
                }
                Some(format!("v{}m.v {}, ({})", dir, data, base))
            }
            _ => None,
        },
        mop::STRIDED => {
            let name = seg("s", &format!("e{}.v", eew));
            Some(format!(
                "{} {}, ({}), {}{}",
                name,
                data,
                base,
                xreg(inst.rs2()),
                m
            ))
        }
        mode => {
            let order = if mode == mop::INDEXED_ORDERED {
                "ox"
            } else {
                "ux"
            };
            let name = seg(order, &format!("ei{}.v", eew));
            Some(format!(
                "{} {}, ({}), {}{}",
                name,
                data,
                base,
                vreg(inst.rs2()),
                m
            ))
        }
    }
}
