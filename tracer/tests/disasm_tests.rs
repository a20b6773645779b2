//! Integration tests for the vector disassembler.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rvv_tracer::arch::VtypeLayout;
use rvv_tracer::isa::{disassemble, Disassembler};

const LOAD_FP: u32 = 0x07;
const STORE_FP: u32 = 0x27;

/// Encodes an `OP-V` instruction.
fn opv(funct6: u32, vm: u32, vs2: u32, rs1: u32, funct3: u32, vd: u32) -> u32 {
    (funct6 << 26) | (vm << 25) | (vs2 << 20) | (rs1 << 15) | (funct3 << 12) | (vd << 7) | 0x57
}

/// Encodes a vector load/store.
#[allow(clippy::too_many_arguments)]
fn mem(nf: u32, mew: u32, mop: u32, vm: u32, rs2: u32, rs1: u32, width: u32, vd: u32, opcode: u32) -> u32 {
    (nf << 29)
        | (mew << 28)
        | (mop << 26)
        | (vm << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (width << 12)
        | (vd << 7)
        | opcode
}

/// Tests integer arithmetic in its vector, scalar and immediate forms.
#[test]
fn test_integer_arithmetic() {
    assert_eq!(disassemble(opv(0, 1, 2, 1, 0, 3)), "vadd.vv v3, v2, v1");
    assert_eq!(disassemble(0x0220_81d7), "vadd.vv v3, v2, v1");
    assert_eq!(disassemble(opv(0b000010, 1, 2, 10, 4, 1)), "vsub.vx v1, v2, a0");
    assert_eq!(
        disassemble(opv(0, 0, 5, 0b11101, 3, 4)),
        "vadd.vi v4, v5, -3, v0.t"
    );
}

/// Tests that shift immediates are unsigned.
#[test]
fn test_unsigned_immediates() {
    assert_eq!(disassemble(opv(0b100101, 1, 2, 31, 3, 1)), "vsll.vi v1, v2, 31");
    assert_eq!(disassemble(opv(0b101100, 1, 2, 3, 3, 1)), "vnsrl.wi v1, v2, 3");
}

/// Tests that operand forms absent from the instruction set are unknown.
#[test]
fn test_reserved_operand_forms() {
    let vsub_vi = opv(0b000010, 1, 2, 1, 3, 1);
    assert_eq!(disassemble(vsub_vi), format!("unknown ({:#010x})", vsub_vi));

    let vadc_unmasked = opv(0b010000, 1, 2, 3, 0, 1);
    assert!(disassemble(vadc_unmasked).starts_with("unknown (0x"));
}

/// Tests merge and move forms sharing one function code.
#[test]
fn test_merge_and_move() {
    assert_eq!(
        disassemble(opv(0b010111, 0, 2, 3, 0, 1)),
        "vmerge.vvm v1, v2, v3, v0"
    );
    assert_eq!(disassemble(opv(0b010111, 1, 0, 10, 4, 1)), "vmv.v.x v1, a0");
    assert_eq!(disassemble(opv(0b010111, 1, 0, 5, 3, 1)), "vmv.v.i v1, 5");
    assert_eq!(disassemble(opv(0b100111, 1, 4, 1, 3, 2)), "vmv2r.v v2, v4");
    assert_eq!(
        disassemble(opv(0b010111, 1, 0, 11, 5, 1)),
        "vfmv.v.f v1, fa1"
    );
}

/// Tests carry forms with and without the mask operand.
#[test]
fn test_carry_forms() {
    assert_eq!(
        disassemble(opv(0b010000, 0, 2, 3, 0, 1)),
        "vadc.vvm v1, v2, v3, v0"
    );
    assert_eq!(disassemble(opv(0b010001, 1, 2, 3, 0, 1)), "vmadc.vv v1, v2, v3");
    assert_eq!(
        disassemble(opv(0b010001, 0, 2, 3, 0, 1)),
        "vmadc.vvm v1, v2, v3, v0"
    );
}

/// Tests the OPM group: multiply-add order, reductions, masks, widening.
#[test]
fn test_opm_group() {
    assert_eq!(disassemble(opv(0b101101, 1, 3, 2, 2, 1)), "vmacc.vv v1, v2, v3");
    assert_eq!(disassemble(opv(0, 1, 2, 3, 2, 1)), "vredsum.vs v1, v2, v3");
    assert_eq!(disassemble(opv(0b011001, 1, 2, 3, 2, 1)), "vmand.mm v1, v2, v3");
    assert_eq!(
        disassemble(opv(0b110100, 1, 4, 6, 2, 2)),
        "vwaddu.wv v2, v4, v6"
    );
    assert_eq!(disassemble(opv(0b100101, 1, 2, 11, 6, 1)), "vmul.vx v1, v2, a1");
}

/// Tests the unary sub-tables.
#[test]
fn test_unary_tables() {
    assert_eq!(disassemble(opv(0b010000, 1, 2, 0, 2, 10)), "vmv.x.s a0, v2");
    assert_eq!(
        disassemble(opv(0b010000, 0, 2, 0b10000, 2, 11)),
        "vcpop.m a1, v2, v0.t"
    );
    assert_eq!(disassemble(opv(0b010000, 1, 0, 10, 6, 1)), "vmv.s.x v1, a0");
    assert_eq!(disassemble(opv(0b010100, 1, 0, 0b10001, 2, 3)), "vid.v v3");
    assert_eq!(
        disassemble(opv(0b010010, 1, 2, 0b00110, 2, 1)),
        "vzext.vf2 v1, v2"
    );
    assert_eq!(disassemble(opv(0b010011, 1, 2, 0, 1, 1)), "vfsqrt.v v1, v2");
    assert_eq!(disassemble(opv(0b010000, 1, 2, 0, 1, 10)), "vfmv.f.s fa0, v2");
}

/// Tests floating-point arithmetic.
#[test]
fn test_float_arithmetic() {
    assert_eq!(disassemble(opv(0, 1, 2, 3, 1, 1)), "vfadd.vv v1, v2, v3");
    assert_eq!(
        disassemble(opv(0b100100, 1, 2, 10, 5, 1)),
        "vfmul.vf v1, v2, fa0"
    );
    assert_eq!(
        disassemble(opv(0b100000, 1, 2, 3, 1, 1)),
        "vfdiv.vv v1, v2, v3"
    );
    assert_eq!(
        disassemble(opv(0b001000, 1, 2, 3, 1, 1)),
        "vfsgnj.vv v1, v2, v3"
    );
}

/// Tests the three configuration instructions.
#[test]
fn test_configuration() {
    assert_eq!(disassemble(0x0d05_f557), "vsetvli a0, a1, e32, m1, ta, ma");

    let vsetivli = (0b11 << 30) | (5 << 20) | (8 << 15) | (7 << 12) | (5 << 7) | 0x57;
    assert_eq!(disassemble(vsetivli), "vsetivli t0, 8, e8, mf2, tu, mu");
    assert_eq!(
        Disassembler::new(VtypeLayout::RVV_1_0).disassemble(vsetivli),
        "vsetivli t0, 8, e8, mf8, tu, mu"
    );

    let vsetvl = (0b100_0000 << 25) | (12 << 20) | (11 << 15) | (7 << 12) | (10 << 7) | 0x57;
    assert_eq!(disassemble(vsetvl), "vsetvl a0, a1, a2");
}

/// Tests unit-stride load variants.
#[test]
fn test_unit_stride_loads() {
    assert_eq!(disassemble(mem(0, 0, 0, 1, 0, 11, 6, 2, LOAD_FP)), "vle32.v v2, (a1)");
    assert_eq!(
        disassemble(mem(0, 0, 0, 0, 0b10000, 10, 0, 1, LOAD_FP)),
        "vle8ff.v v1, (a0), v0.t"
    );
    assert_eq!(
        disassemble(mem(2, 0, 0, 1, 0, 10, 5, 4, LOAD_FP)),
        "vlseg3e16.v v4, (a0)"
    );
    assert_eq!(
        disassemble(mem(1, 0, 0, 1, 0b01000, 10, 7, 2, LOAD_FP)),
        "vl2re64.v v2, (a0)"
    );
    assert_eq!(
        disassemble(mem(0, 0, 0, 1, 0b01011, 10, 0, 0, LOAD_FP)),
        "vlm.v v0, (a0)"
    );
}

/// Tests strided and indexed accesses.
#[test]
fn test_strided_and_indexed() {
    assert_eq!(
        disassemble(mem(0, 0, 2, 1, 11, 10, 6, 1, LOAD_FP)),
        "vlse32.v v1, (a0), a1"
    );
    assert_eq!(
        disassemble(mem(0, 0, 1, 1, 2, 10, 0, 1, LOAD_FP)),
        "vluxei8.v v1, (a0), v2"
    );
    assert_eq!(
        disassemble(mem(1, 0, 3, 0, 8, 10, 6, 4, LOAD_FP)),
        "vloxseg2ei32.v v4, (a0), v8, v0.t"
    );
}

/// Tests vector stores.
#[test]
fn test_stores() {
    assert_eq!(disassemble(mem(0, 0, 0, 1, 0, 10, 6, 3, STORE_FP)), "vse32.v v3, (a0)");
    assert_eq!(
        disassemble(mem(0, 0, 0, 1, 0b01000, 10, 0, 3, STORE_FP)),
        "vs1r.v v3, (a0)"
    );
    assert_eq!(
        disassemble(mem(0, 0, 0, 1, 0b01011, 10, 0, 1, STORE_FP)),
        "vsm.v v1, (a0)"
    );

    let store_ff = mem(0, 0, 0, 1, 0b10000, 10, 0, 1, STORE_FP);
    assert!(disassemble(store_ff).starts_with("unknown"));
    let wide_eew = mem(0, 1, 0, 1, 0, 10, 0, 1, LOAD_FP);
    assert!(disassemble(wide_eew).starts_with("unknown"));
}

/// Tests scalar floating-point accesses sharing the vector opcodes.
#[test]
fn test_scalar_fp_access() {
    let flw = (8 << 20) | (2 << 15) | (2 << 12) | (10 << 7) | LOAD_FP;
    assert_eq!(disassemble(flw), "flw fa0, 8(sp)");

    let fsd = (0x7f << 25) | (11 << 20) | (2 << 15) | (3 << 12) | (0x10 << 7) | STORE_FP;
    assert_eq!(disassemble(fsd), "fsd fa1, -16(sp)");
}

/// Tests the placeholder for non-vector opcodes.
#[test]
fn test_unknown_placeholder() {
    assert_eq!(disassemble(0x0000_0013), "unknown (0x00000013)");
    assert_eq!(disassemble(0), "unknown (0x00000000)");
    assert_eq!(disassemble(0xffff_ffff), "unknown (0xffffffff)");
}

/// Tests that every word gets a stable, non-empty label.
#[test]
fn test_total_and_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let disasm = Disassembler::default();
    for _ in 0..20_000 {
        let mut word: u32 = rng.random();
        if rng.random_bool(0.75) {
            let opcodes = [0x57, LOAD_FP, STORE_FP];
            word = (word & !0x7f) | opcodes[rng.random_range(0..opcodes.len())];
        }
        let label = disasm.disassemble(word);
        assert!(!label.is_empty());
        assert_eq!(label, disasm.disassemble(word));
    }
}
