use super::*;
use crate::foundation::core::Channels;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stickerbooth_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba(rgba));
    img.save(path).unwrap();
}

#[test]
fn load_dir_reads_default_set_in_order() {
    let tmp = temp_dir("store_default_set");
    std::fs::create_dir_all(&tmp).unwrap();
    for name in DEFAULT_STICKERS {
        write_png(&tmp.join(format!("{name}.png")), [1, 2, 3, 255]);
    }

    let sheet = StickerSheet::load_dir(&tmp).unwrap();
    assert_eq!(sheet.names(), DEFAULT_STICKERS.to_vec());
    let bmp = sheet.bitmap(5).unwrap();
    assert_eq!(bmp.dimensions(), (3, 2));
    assert_eq!(bmp.channels(), Channels::Rgba);
    assert!(sheet.get(6).is_none());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_sticker_is_fatal_and_named() {
    let tmp = temp_dir("store_missing");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("eyeglasses.png"), [1, 2, 3, 255]);

    let err = StickerSheet::load_dir(&tmp).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("'hat'"), "{err}");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn manifest_paths_resolve_against_its_directory() {
    let tmp = temp_dir("store_manifest");
    std::fs::create_dir_all(tmp.join("art")).unwrap();
    write_png(&tmp.join("art/crown.png"), [9, 9, 9, 0]);
    std::fs::write(
        tmp.join("stickers.json"),
        r#"[{"name": "crown", "path": "art/crown.png"}]"#,
    )
    .unwrap();

    let sheet = StickerSheet::load(&tmp.join("stickers.json")).unwrap();
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.get(0).unwrap().name, "crown");

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn malformed_manifest_is_asset_error() {
    let tmp = temp_dir("store_bad_manifest");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("m.json"), "{").unwrap();
    let err = StickerSheet::load_manifest(&tmp.join("m.json")).unwrap_err();
    assert!(matches!(err, BoothError::Asset(_)));
    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn thumbnails_are_square_and_keep_alpha() {
    let bmp = PixelBuffer::filled(4, 2, &[10, 20, 30, 255]).unwrap();
    let sheet = StickerSheet::new(vec![Sticker {
        name: "tile".into(),
        bitmap: Arc::new(bmp),
    }]);
    let thumb = sheet.thumbnail(0).unwrap().unwrap();
    assert_eq!(thumb.dimensions(), (THUMB_SIZE, THUMB_SIZE));
    assert_eq!(thumb.pixel(40, 40).unwrap(), &[10, 20, 30, 255]);
    assert!(sheet.thumbnail(1).unwrap().is_none());
}
