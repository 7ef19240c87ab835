#[cfg(test)]
mod tests {
    use hexops::document::Document;
    use hexops::parse::parse_operand;
    use hexops::{ByteRange, OperandWidth, OperatorKind};

    #[test]
    fn test_open_apply_save_roundtrip() {
        let mut path = std::env::temp_dir();
        path.push(format!("hexops_roundtrip_test_{}.bin", std::process::id()));
        std::fs::write(&path, [0x10u8, 0x20, 0x30, 0x40, 0x50]).expect("Write failed");

        let mut document = Document::open(&path).expect("Open failed");
        assert!(!document.is_dirty());

        let operand = parse_operand("0101", OperandWidth::Word, false).unwrap();
        let count = document
            .apply_operation(ByteRange::new(0, 5), OperatorKind::Add, operand)
            .unwrap();
        assert_eq!(count, 2);
        assert!(document.is_dirty());

        document.save().expect("Save failed");
        assert!(!document.is_dirty());

        let reloaded = std::fs::read(&path).expect("Read failed");
        assert_eq!(reloaded, vec![0x11, 0x21, 0x31, 0x41, 0x50]);

        // Undo past the save point marks the document dirty again.
        document.undo_last_command();
        assert!(document.is_dirty());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_as_updates_path() {
        let mut path = std::env::temp_dir();
        path.push(format!("hexops_save_as_test_{}.bin", std::process::id()));

        let mut document = Document::from_bytes(vec![0xAA, 0xBB]);
        assert!(document.save().is_err());

        document.save_as(&path).expect("Save failed");
        assert_eq!(document.file_path.as_deref(), Some(path.as_path()));
        assert_eq!(std::fs::read(&path).expect("Read failed"), vec![0xAA, 0xBB]);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let mut path = std::env::temp_dir();
        path.push(format!("hexops_definitely_missing_{}.bin", std::process::id()));
        let _ = std::fs::remove_file(&path);
        assert!(Document::open(&path).is_err());
    }
}
