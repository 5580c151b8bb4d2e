#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use crate::light_field::common::error::EpiError;
    use crate::light_field::container::parse;
    use crate::light_field::stack::{natural_cmp, save_blob, DirectoryFrameSource, FrameSource};
    use crate::light_field::test_support::u8_rgb;

    fn write_frame(dir: &std::path::Path, name: &str, tag: u8) {
        let blob = u8_rgb(2, 2, move |_, _, _| tag);
        fs::write(dir.join(name), blob.to_bytes()).unwrap();
    }

    fn tag_of(blob: &crate::light_field::container::ImageBlob) -> u8 {
        blob.payload()[0]
    }

    #[test]
    fn test_natural_order() {
        let mut names = vec!["h_10.imgb", "h_2.imgb", "H_1.imgb", "h_02b.imgb", "h_1.imgb"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["H_1.imgb", "h_1.imgb", "h_2.imgb", "h_02b.imgb", "h_10.imgb"]);
    }

    #[test]
    fn test_load_stack_filters_and_sorts() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "h_10.imgb", 10);
        write_frame(dir.path(), "h_2.IMGB", 2);
        write_frame(dir.path(), "h_1.imgb", 1);
        write_frame(dir.path(), "v_1.imgb", 99);
        write_frame(dir.path(), "h_3.png", 77);
        fs::create_dir(dir.path().join("h_4.imgb")).unwrap();

        let source = DirectoryFrameSource::new(dir.path());
        let stack = source.load_stack("h_").unwrap();
        let tags: Vec<u8> = stack.frames().iter().map(tag_of).collect();
        assert_eq!(tags, vec![1, 2, 10]);

        let v = source.load_stack("v_").unwrap();
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "h_1.bin", 1);
        write_frame(dir.path(), "h_2.imgb", 2);

        let source = DirectoryFrameSource::new(dir.path()).with_extension(".bin");
        let stack = source.load_stack("h_").unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(tag_of(stack.first()), 1);
    }

    #[test]
    fn test_no_matching_frames() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "v_1.imgb", 1);
        let err = DirectoryFrameSource::new(dir.path()).load_stack("h_").unwrap_err();
        assert!(matches!(err, EpiError::InputReadError(_)));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let source = DirectoryFrameSource::new(dir.path().join("absent"));
        assert!(matches!(source.load_stack("h_"), Err(EpiError::InputReadError(_))));
    }

    #[test]
    fn test_corrupt_frame_reports_index() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "h_1.imgb", 1);
        fs::write(dir.path().join("h_2.imgb"), b"IMGB").unwrap();

        let err = DirectoryFrameSource::new(dir.path()).load_stack("h_").unwrap_err();
        assert!(matches!(err, EpiError::Frame { index: 1, .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_mixed_geometry_rejected() {
        let dir = tempdir().unwrap();
        write_frame(dir.path(), "h_1.imgb", 1);
        fs::write(dir.path().join("h_2.imgb"), u8_rgb(3, 2, |_, _, _| 0).to_bytes()).unwrap();

        let err = DirectoryFrameSource::new(dir.path()).load_stack("h_").unwrap_err();
        assert!(matches!(err, EpiError::InvalidFormat(_)));
    }

    #[test]
    fn test_save_blob_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("C_h.imgb");
        let blob = u8_rgb(2, 1, |x, _, c| (x * 3 + c) as u8);

        save_blob(&path, &blob).unwrap();
        let back = parse(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.payload(), blob.payload());
        assert_eq!((back.width(), back.height()), (2, 1));
    }
}
