use studyport_core::upload::{UploadDescriptor, UploadError, UploadPolicy, storage_file_name};

fn image_policy() -> UploadPolicy {
    UploadPolicy::new(
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
            "image/gif".to_string(),
        ],
        Some(5 * 1024 * 1024),
    )
}

fn descriptor(mime: &str, name: &str, size: usize) -> UploadDescriptor {
    UploadDescriptor {
        mime_type: mime.to_string(),
        original_name: name.to_string(),
        size,
    }
}

#[test]
fn test_png_accepted_by_image_allow_list() {
    assert!(
        image_policy()
            .accept(&descriptor("image/png", "photo.png", 2048))
            .is_ok()
    );
}

#[test]
fn test_pdf_rejected_by_image_allow_list() {
    let err = image_policy()
        .accept(&descriptor("application/pdf", "notes.pdf", 2048))
        .unwrap_err();
    assert!(matches!(err, UploadError::UnsupportedType { .. }));
}

#[test]
fn test_every_default_image_type_accepted() {
    let policy = image_policy();
    for (mime, name) in [
        ("image/jpeg", "a.jpg"),
        ("image/png", "a.png"),
        ("image/webp", "a.webp"),
        ("image/gif", "a.gif"),
    ] {
        assert!(policy.accept(&descriptor(mime, name, 1024)).is_ok());
    }
}

#[test]
fn test_wildcard_configuration_accepts_any_image() {
    let policy = UploadPolicy::new(vec!["image/*".to_string()], Some(1024));
    assert!(policy.accept(&descriptor("image/bmp", "a.bmp", 512)).is_ok());
    assert!(
        policy
            .accept(&descriptor("video/mp4", "a.mp4", 512))
            .is_err()
    );
}

#[test]
fn test_oversized_rejected_before_any_write() {
    let err = image_policy()
        .accept(&descriptor("image/png", "huge.png", 6 * 1024 * 1024))
        .unwrap_err();
    assert!(matches!(
        err,
        UploadError::TooLarge {
            max_bytes: 5242880,
            ..
        }
    ));
}

#[test]
fn test_derived_storage_name() {
    assert_eq!(storage_file_name("u1", 1000, "photo.png"), "u1_1000.png");
}

#[test]
fn test_derived_storage_name_keeps_owner_and_timestamp_distinct() {
    let a = storage_file_name("u1", 1000, "photo.png");
    let b = storage_file_name("u1", 1001, "photo.png");
    let c = storage_file_name("u2", 1000, "photo.png");
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_derived_storage_name_survives_hostile_filenames() {
    assert_eq!(
        storage_file_name("u1", 1000, "../../../etc/cron.d/evil.sh"),
        "u1_1000.sh"
    );
    assert_eq!(storage_file_name("u1", 1000, ""), "u1_1000");
}

#[test]
fn test_rejection_message_names_the_constraint() {
    let type_err = image_policy()
        .accept(&descriptor("application/zip", "a.zip", 10))
        .unwrap_err();
    assert!(type_err.to_string().contains("application/zip"));
    assert!(type_err.to_string().contains("image/png"));

    let size_err = image_policy()
        .accept(&descriptor("image/png", "a.png", usize::MAX))
        .unwrap_err();
    assert!(size_err.to_string().contains("exceeds maximum size"));
}
