#[cfg(test)]
mod tests {
    use crate::light_field::common::error::EpiError;
    use crate::light_field::container::{ImageBlob, SampleEncoding};
    use crate::light_field::epi::{build_epis, horizontal_epi, vertical_epi, FrameStack};
    use crate::light_field::test_support::{fixed_rgb, Q};

    // value encodes (angle, x, y, channel) so every copy can be traced back
    fn tagged(a: usize, x: usize, y: usize, c: usize) -> i64 {
        (a * 1000 + y * 100 + x * 10 + c) as i64
    }

    fn stack(count: usize, w: u32, h: u32) -> FrameStack {
        FrameStack::new(
            (0..count)
                .map(|a| fixed_rgb(w, h, |x, y, c| tagged(a, x, y, c)))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_horizontal_epi_gathers_rows() {
        let (w, h) = (4, 3);
        let epis = build_epis(&stack(5, w, h), &stack(2, w, h)).unwrap();

        assert_eq!(epis.horizontal.len(), h as usize);
        assert_eq!(epis.angular_h(), 5);
        for (y, epi) in epis.horizontal.iter().enumerate() {
            assert_eq!(epi.width(), w);
            assert_eq!(epi.height(), 5);
            assert_eq!(epi.channels(), 3);
            for u in 0..5 {
                for x in 0..w as usize {
                    for c in 0..3 {
                        assert_eq!(epi.fixed_value(x, u, c, &Q), tagged(u, x, y, c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_vertical_epi_gathers_columns() {
        let (w, h) = (4, 3);
        let epis = build_epis(&stack(2, w, h), &stack(3, w, h)).unwrap();

        assert_eq!(epis.vertical.len(), w as usize);
        assert_eq!(epis.angular_v(), 3);
        for (x, epi) in epis.vertical.iter().enumerate() {
            assert_eq!(epi.width(), h);
            assert_eq!(epi.height(), 3);
            for v in 0..3 {
                for y in 0..h as usize {
                    for c in 0..3 {
                        assert_eq!(epi.fixed_value(y, v, c, &Q), tagged(v, x, y, c));
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_slice_rejected() {
        let s = stack(3, 4, 3);
        assert!(horizontal_epi(&s, 2).is_ok());
        assert!(vertical_epi(&s, 3).is_ok());

        assert!(matches!(horizontal_epi(&s, 3), Err(EpiError::InvalidFormat(_))));
        assert!(matches!(vertical_epi(&s, 4), Err(EpiError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_stack_rejected() {
        let err = FrameStack::new(Vec::new()).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_mixed_geometry_rejected() {
        let frames = vec![fixed_rgb(4, 4, |_, _, _| 0), fixed_rgb(4, 3, |_, _, _| 0)];
        let err = FrameStack::new(frames).unwrap_err();
        assert!(matches!(err, EpiError::InvalidFormat(_)));
    }

    #[test]
    fn test_wrong_encoding_rejected() {
        let u8_frame = ImageBlob::new(2, 2, 3, SampleEncoding::U8, vec![0; 12]).unwrap();
        let h = FrameStack::new(vec![u8_frame]).unwrap();
        let err = build_epis(&h, &stack(1, 2, 2)).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_stack_size_mismatch_rejected() {
        let err = build_epis(&stack(3, 4, 4), &stack(3, 4, 5)).unwrap_err();
        assert!(matches!(err, EpiError::InvalidFormat(_)));
    }
}
