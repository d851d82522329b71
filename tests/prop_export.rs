use proptest::prelude::*;
use stockdbf::export::{ExportOptions, Window, export_records};
use stockdbf::normalize::slugify;
use stockdbf::record::Value;
use stockdbf::source::MemorySource;

proptest! {
    #[test]
    fn prop_window_row_count(total in 0usize..40, offset in -5i64..60, limit in -5i64..60) {
        let mut src = MemorySource::new(["STCODIGO"]);
        for i in 0..total {
            src.push_row(vec![Value::from(format!("C{i}"))]);
        }
        let window = Window::from_signed(offset, limit);
        let opts = ExportOptions { window, progress_every: None, ..ExportOptions::default() };
        let mut out = Vec::new();
        let report = export_records(&mut src, &mut out, &opts).unwrap();

        let skip = usize::try_from(offset.max(0)).unwrap();
        let remaining = total.saturating_sub(skip);
        let expected = if limit > 0 { remaining.min(usize::try_from(limit).unwrap()) } else { remaining };
        prop_assert_eq!(report.rows, expected);
        prop_assert_eq!(report.rows, window.expected_rows(total));
        prop_assert_eq!(report.skipped, skip.min(total));
        prop_assert_eq!(String::from_utf8(out).unwrap().lines().count(), expected + 1);
    }

    #[test]
    fn prop_slug_idempotent(s in ".{0,40}") {
        let once = slugify(&s);
        prop_assert_eq!(slugify(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!once.starts_with('-') && !once.ends_with('-') && !once.contains("--"));
    }
}
