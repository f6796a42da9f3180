//! Tests for quotation numbering, the totals invariant, and the wire envelope

use proptest::prelude::*;

use shared::{
    format_quotation_no, quotation_seq, validate_totals, ApiResponse, ImportedQuotation,
    PackageQuote, QuotationLine, QuotationStatus, SurveyStatus,
};

/// A reconciled line with one selected package
fn line(volume: f64, unit_price: f64, total_price: i64) -> QuotationLine {
    QuotationLine {
        service_group: "Thiết kế".to_string(),
        service: "Thiết kế nhà phố".to_string(),
        volume,
        packages: vec![PackageQuote {
            package_name: "Gói 1".to_string(),
            unit_price,
            total_price,
            is_selected: true,
        }],
    }
}

// =============================================================================
// Quotation Numbering
// =============================================================================

mod numbering {
    use super::*;

    #[test]
    fn first_number_is_bg001() {
        // No prior quotation: the sequence starts at 1
        let seq = None::<&str>.and_then(quotation_seq).unwrap_or(0) + 1;
        assert_eq!(format_quotation_no(seq), "BG001");
    }

    #[test]
    fn bg007_increments_to_bg008() {
        let seq = quotation_seq("BG007").unwrap() + 1;
        assert_eq!(format_quotation_no(seq), "BG008");
    }

    #[test]
    fn padding_grows_past_three_digits() {
        assert_eq!(format_quotation_no(999), "BG999");
        assert_eq!(format_quotation_no(1000), "BG1000");
    }

    #[test]
    fn seq_is_first_run_of_digits() {
        assert_eq!(quotation_seq("BG042"), Some(42));
        assert_eq!(quotation_seq("BG12A7"), Some(12));
        assert_eq!(quotation_seq("BG"), None);
        assert_eq!(quotation_seq(""), None);
    }

    proptest! {
        #[test]
        fn format_then_parse_round_trips(seq in 1u32..100_000) {
            prop_assert_eq!(quotation_seq(&format_quotation_no(seq)), Some(seq));
        }
    }
}

// =============================================================================
// Totals Invariant
// =============================================================================

mod totals {
    use super::*;

    #[test]
    fn matching_totals_pass() {
        let lines = vec![line(10.0, 500_000.0, 5_000_000), line(2.0, 100_000.0, 200_000)];
        assert!(validate_totals(&lines, 5_200_000).is_ok());
    }

    #[test]
    fn mismatched_grand_total_fails() {
        let lines = vec![line(10.0, 500_000.0, 5_000_000)];
        assert!(validate_totals(&lines, 4_000_000).is_err());
    }

    #[test]
    fn zero_volume_line_fails() {
        let lines = vec![line(0.0, 500_000.0, 0)];
        assert!(validate_totals(&lines, 0).is_err());
    }

    #[test]
    fn line_without_packages_fails() {
        let mut bad = line(10.0, 500_000.0, 5_000_000);
        bad.packages.clear();
        assert!(validate_totals(&[bad], 0).is_err());
    }

    #[test]
    fn non_positive_unit_price_fails() {
        let lines = vec![line(10.0, 0.0, 0)];
        assert!(validate_totals(&lines, 0).is_err());
    }
}

// =============================================================================
// Status Lifecycles
// =============================================================================

mod statuses {
    use super::*;

    #[test]
    fn quotation_status_round_trips() {
        for status in [
            QuotationStatus::Draft,
            QuotationStatus::Sent,
            QuotationStatus::Accepted,
            QuotationStatus::Rejected,
        ] {
            assert_eq!(QuotationStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_quotation_status_defaults_to_draft() {
        assert_eq!(QuotationStatus::parse("archived"), QuotationStatus::Draft);
    }

    #[test]
    fn survey_status_round_trips() {
        for status in [
            SurveyStatus::New,
            SurveyStatus::InProgress,
            SurveyStatus::Completed,
            SurveyStatus::Quoted,
        ] {
            assert_eq!(SurveyStatus::parse(status.as_str()), status);
        }
    }
}

// =============================================================================
// Wire Envelope
// =============================================================================

mod envelope {
    use super::*;

    #[test]
    fn success_envelope_carries_camel_case_payload() {
        let response = ApiResponse::ok(
            "Tạo báo giá BG001 thành công",
            ImportedQuotation {
                quotation_no: "BG001".to_string(),
            },
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Tạo báo giá BG001 thành công");
        assert_eq!(value["data"]["quotationNo"], "BG001");
    }

    #[test]
    fn error_envelope_omits_data() {
        let response = ApiResponse::<ImportedQuotation>::error("Không tìm thấy khảo sát");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
    }
}
