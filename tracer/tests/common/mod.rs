//! Shared record constructors for the integration tests.
#![allow(dead_code)]

use rvv_tracer::common::{InstructionType, Pc, Word};
use rvv_tracer::trace::{InstructionRecord, Trace};

/// `vadd.vv v3, v2, v1`
pub const VADD_VV: u32 = 0x0220_81d7;
/// `vsetvli a0, a1, e32, m1, ta, ma`
pub const VSETVLI: u32 = 0x0d05_f557;

/// Register-register record reading `sources` and writing `vd`.
pub fn reg_op(number: u64, pc: &str, vd: Option<u8>, sources: &[u8]) -> InstructionRecord {
    let mut rec = InstructionRecord::new(number, Pc::new(pc), VADD_VV, InstructionType::RegReg);
    rec.vd = vd;
    rec.vs1 = sources.first().copied();
    rec.vs2 = sources.get(1).copied();
    rec
}

/// Vector CSR configuration record setting `vl` and `vtype`.
pub fn csr_op(number: u64, pc: &str, vl: u64, vtype: u64) -> InstructionRecord {
    let mut rec = InstructionRecord::new(number, Pc::new(pc), VSETVLI, InstructionType::VectorCsr);
    rec.vl = Some(Word(vl));
    rec.vtype = Some(Word(vtype));
    rec
}

/// Vector load writing `vd`.
pub fn load_op(number: u64, pc: &str, vd: u8) -> InstructionRecord {
    let mut rec = InstructionRecord::new(number, Pc::new(pc), 0x0205_e107, InstructionType::LoadStore);
    rec.vd = Some(vd);
    rec
}

pub fn trace(records: Vec<InstructionRecord>) -> Trace {
    Trace::new(records)
}

/// A loop body executed `iterations` times at fixed program counters:
/// load v1, load v2, add v3 = v1 + v2, accumulate v4 += v3.
pub fn loop_trace(iterations: u64) -> Trace {
    let mut records = vec![csr_op(0, "0x1000", 4, 0xd0)];
    let mut n = 1;
    for _ in 0..iterations {
        records.push(load_op(n, "0x1004", 1));
        records.push(load_op(n + 1, "0x1008", 2));
        records.push(reg_op(n + 2, "0x100c", Some(3), &[1, 2]));
        records.push(reg_op(n + 3, "0x1010", Some(4), &[3, 4]));
        n += 4;
    }
    Trace::new(records)
}
