use super::exec::Exec;
use super::{decode_cb, Bus, CbInstruction, CbOp};

impl<B: Bus> Exec<'_, B> {
    /// Fetch and run the opcode following a 0xCB prefix.
    pub(in crate::cpu) fn step_cb(&mut self) -> CbInstruction {
        let cb = decode_cb(self.fetch8());
        let value = self.read_r8(cb.target);

        let regs = &mut *self.regs;
        let result = match cb.op {
            CbOp::Bit(bit) => {
                // BIT only reads its operand.
                regs.test_bit(bit, value);
                return cb;
            }
            CbOp::Res(bit) => value & !(1 << bit),
            CbOp::Set(bit) => value | (1 << bit),
            op => regs.shift(op, value),
        };

        self.write_r8(cb.target, result);
        cb
    }
}
