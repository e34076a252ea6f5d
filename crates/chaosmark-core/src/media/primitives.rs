/// stores one bit in the least significant bit of a color channel sample
pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut u8 {
    fn hide_bit(self, bit: bool) {
        *self = (*self & (u8::MAX - 1)) | u8::from(bit);
    }
}

/// reads the bit stored in the least significant bit of a color channel sample
pub trait UnveilBit {
    fn unveil_bit(&self) -> bool;
}

impl UnveilBit for u8 {
    fn unveil_bit(&self) -> bool {
        self & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_touch_the_lowest_bit() {
        let mut c: u8 = 0b1010_1010;
        (&mut c).hide_bit(true);
        assert_eq!(c, 0b1010_1011);
        (&mut c).hide_bit(false);
        assert_eq!(c, 0b1010_1010);

        let mut c = u8::MAX;
        (&mut c).hide_bit(true);
        assert_eq!(c, u8::MAX);
        assert!(c.unveil_bit());
        assert!(!0u8.unveil_bit());
    }
}
