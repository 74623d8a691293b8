use crate::{
    domain::{ClipId, MediaType, Sample},
    protocol::{SampleQuery, SamplesPage, ValidationReport},
};

#[test]
fn decodes_validation_samples_payload_with_echo_fields() {
    let raw = serde_json::json!({
        "total": 57,
        "skip": 0,
        "limit": 20,
        "returned": 1,
        "samples": [{
            "clip_id": "3060727",
            "media_type": "video",
            "file_path": "/data/clips/3060727.mp4",
            "caption": "A reporter stands in front of the assembly hall...",
            "resolution": "1920x1080",
            "length": "00:00:12",
            "category": "뉴스",
            "keyword": "politics"
        }]
    });

    let page: SamplesPage = serde_json::from_value(raw).expect("decode");
    assert_eq!(page.total, 57);
    assert_eq!(page.returned, Some(1));
    assert_eq!(page.samples.len(), 1);
    assert_eq!(page.samples[0].clip_id, ClipId::from("3060727"));
    assert!(page.samples[0].media_type.is_video());
}

#[test]
fn missing_optional_columns_decode_as_empty_strings() {
    let raw = serde_json::json!({
        "clip_id": "42",
        "file_path": "/data/42.png"
    });

    let sample: Sample = serde_json::from_value(raw).expect("decode");
    assert_eq!(sample.caption, "");
    assert_eq!(sample.category, "");
    assert_eq!(sample.media_type.as_str(), "");
}

#[test]
fn unknown_media_type_is_kept_verbatim() {
    let media: MediaType = serde_json::from_value(serde_json::json!("audio")).expect("decode");
    assert_eq!(media, MediaType::Other("audio".to_string()));
    assert_eq!(
        serde_json::to_value(&media).expect("encode"),
        serde_json::json!("audio")
    );
}

#[test]
fn missing_total_is_a_shape_mismatch() {
    let raw = serde_json::json!({ "samples": [] });
    assert!(serde_json::from_value::<SamplesPage>(raw).is_err());
}

#[test]
fn sample_query_derives_skip_from_page() {
    let query = SampleQuery::for_page(2, 20, None);
    assert_eq!(query.skip, 40);
    assert_eq!(query.limit, 20);
    assert_eq!(query.category, None);
}

#[test]
fn sample_query_drops_blank_category() {
    assert_eq!(SampleQuery::for_page(0, 20, Some("  ")).category, None);
    assert_eq!(
        SampleQuery::for_page(0, 20, Some("드라마")).category.as_deref(),
        Some("드라마")
    );
}

#[test]
fn validation_report_filename_is_optional() {
    let report: ValidationReport =
        serde_json::from_value(serde_json::json!({ "content": "# Report" })).expect("decode");
    assert_eq!(report.content, "# Report");
    assert!(report.filename.is_none());
}
