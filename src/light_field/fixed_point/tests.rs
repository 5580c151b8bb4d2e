#[cfg(test)]
mod tests {
    use crate::light_field::fixed_point::{
        FixedPointFormat, U24_MAX, clamp_q, floor_div, read_u24, round_div, round_half_div2,
        saturate_i64, write_u24,
    };

    const Q: FixedPointFormat = FixedPointFormat::q12_12();

    #[test]
    fn test_u24_little_endian_layout() {
        let mut buf = [0u8; 6];
        write_u24(&mut buf, 3, 0x00AB_CDEF);
        assert_eq!(buf, [0, 0, 0, 0xEF, 0xCD, 0xAB]);
        assert_eq!(read_u24(&buf, 3), 0x00AB_CDEF);
    }

    #[test]
    fn test_u24_write_masks_high_bits() {
        let mut buf = [0u8; 3];
        write_u24(&mut buf, 0, 0xFF12_3456);
        assert_eq!(read_u24(&buf, 0), 0x12_3456);
    }

    #[test]
    fn test_default_format_constants() {
        assert_eq!(Q.one(), 4096);
        assert_eq!(Q.bias_offset(), 8_388_608);
        assert_eq!(Q.bias(0), 8_388_608);
        assert_eq!(Q.unbias(8_388_608), 0);
        assert_eq!(FixedPointFormat::default(), Q);
    }

    #[test]
    fn test_bias_saturates_without_wrapping() {
        assert_eq!(Q.bias(-8_388_608), 0);
        assert_eq!(Q.bias(-8_388_609), 0);
        assert_eq!(Q.bias(i64::MIN), 0);
        assert_eq!(Q.bias(8_388_607), U24_MAX);
        assert_eq!(Q.bias(8_388_608), U24_MAX);
        assert_eq!(Q.bias(i64::MAX), U24_MAX);
    }

    #[test]
    fn test_bias_unbias_round_trip_in_range() {
        for v in [-8_388_608i64, -4096, -1, 0, 1, 4096, 255 * 4096, 8_388_607] {
            assert_eq!(Q.unbias(Q.bias(v)), v);
        }
    }

    #[test]
    fn test_round_half_div2_symmetry() {
        for x in -1000i64..=1000 {
            assert_eq!(round_half_div2(x), -round_half_div2(-x), "x = {}", x);
        }
        assert_eq!(round_half_div2(3), 2);
        assert_eq!(round_half_div2(-3), -2);
        assert_eq!(round_half_div2(4), 2);
        assert_eq!(round_half_div2(1), 1);
        assert_eq!(round_half_div2(-1), -1);
    }

    #[test]
    fn test_mul_rounds_and_keeps_sign() {
        assert_eq!(Q.mul(Q.one(), Q.one()), Q.one());
        assert_eq!(Q.mul(2048, 2048), 1024);
        // 1 * 2048 / 4096 = 0.5 -> rounds away from zero
        assert_eq!(Q.mul(1, 2048), 1);
        assert_eq!(Q.mul(-1, 2048), -1);
        assert_eq!(Q.mul(-3 * 4096, 2 * 4096), -6 * 4096);
    }

    #[test]
    fn test_mul_uses_wide_intermediate() {
        let big = 8_000_000i64;
        assert_eq!(Q.mul(big, big), ((big as i128 * big as i128 + 2048) >> 12) as i64);
    }

    #[test]
    fn test_div_and_inv() {
        assert_eq!(Q.div(Q.one(), 2 * Q.one()), 2048);
        assert_eq!(Q.div(-Q.one(), 2 * Q.one()), -2048);
        assert_eq!(Q.div(3 * Q.one(), Q.one()), 3 * Q.one());
        assert_eq!(Q.inv(Q.one()), Q.one());
        assert_eq!(Q.inv(2 * Q.one()), 2048);
        assert_eq!(Q.inv(-2 * Q.one()), -2048);
        // 1/3 = 1365.33
        assert_eq!(Q.inv(3 * Q.one()), 1365);
    }

    #[test]
    fn test_div_by_zero_is_zero() {
        assert_eq!(Q.div(12345, 0), 0);
        assert_eq!(Q.inv(0), 0);
    }

    #[test]
    fn test_div_extreme_numerator() {
        assert_eq!(Q.div(i64::MIN, 4096), i64::MIN);
        assert_eq!(Q.div(i64::MIN, 1), i64::MIN);
        assert_eq!(Q.div(i64::MAX, 1), i64::MAX);
    }

    #[test]
    fn test_saturate_i64() {
        assert_eq!(saturate_i64(-5), -5);
        assert_eq!(saturate_i64(i64::MAX as i128 + 1), i64::MAX);
        assert_eq!(saturate_i64(i128::MIN), i64::MIN);
    }

    #[test]
    fn test_pow_int() {
        assert_eq!(Q.pow_int(12345, 0), Q.one());
        assert_eq!(Q.pow_int(12345, -3), Q.one());
        assert_eq!(Q.pow_int(12345, 1), 12345);
        assert_eq!(Q.pow_int(2048, 2), 1024);
        assert_eq!(Q.pow_int(2048, 4), 256);
        assert_eq!(Q.pow_int(2 * Q.one(), 3), 8 * Q.one());
        // 1 LSB^4 underflows to zero after renormalisation
        assert_eq!(Q.pow_int(1, 4), 0);
    }

    #[test]
    fn test_clamp_q() {
        assert_eq!(clamp_q(-5, 1, 4096), 1);
        assert_eq!(clamp_q(5000, 1, 4096), 4096);
        assert_eq!(clamp_q(100, 1, 4096), 100);
        assert_eq!(Q.clamp(7, 10, 5), 10);
    }

    #[test]
    fn test_floor_and_round_div() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-7, -2), 3);
        assert_eq!(round_div(7, 2), 4);
        assert_eq!(round_div(-7, 2), -4);
        assert_eq!(round_div(10, 4), 3);
        assert_eq!(round_div(9, 4), 2);
    }

    #[test]
    fn test_custom_format_validation() {
        assert!(FixedPointFormat::new(0, 0).is_err());
        assert!(FixedPointFormat::new(24, 0).is_err());
        assert!(FixedPointFormat::new(8, -1).is_err());
        let q8 = FixedPointFormat::new(8, 1 << 23).unwrap();
        assert_eq!(q8.one(), 256);
        assert_eq!(q8.mul(512, 512), 1024);
        assert_eq!(q8.from_int(3), 768);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(Q.from_f64(0.5), 2048);
        assert_eq!(Q.from_f64(-1.0), -4096);
        assert_eq!(Q.to_f64(6144), 1.5);
    }
}
