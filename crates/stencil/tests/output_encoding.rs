//! Tests for destination-driven output encoding.

use std::path::{Path, PathBuf};

use stencil::{layers, Expander, MapEnv, OutputEncoding};

// =============================================================================
// Encoding selection
// =============================================================================

#[test]
fn reg_destination_selects_utf16le() {
    assert_eq!(
        OutputEncoding::for_destination(Path::new("out.reg")),
        OutputEncoding::Utf16Le
    );
    assert_eq!(
        OutputEncoding::for_destination(Path::new(r"C:\scripts\SETUP.REG")),
        OutputEncoding::Utf16Le
    );
}

#[test]
fn everything_else_selects_utf8() {
    for path in ["out.txt", "out.xml", "out", "reg", "out.regx", "a.reg.bak"] {
        assert_eq!(
            OutputEncoding::for_destination(Path::new(path)),
            OutputEncoding::Utf8,
            "{path}"
        );
    }
}

// =============================================================================
// Byte production
// =============================================================================

#[test]
fn utf8_bytes_have_no_bom() {
    assert_eq!(OutputEncoding::Utf8.encode("Ab"), b"Ab".to_vec());
}

#[test]
fn utf16le_bytes_start_with_bom() {
    assert_eq!(
        OutputEncoding::Utf16Le.encode("A"),
        vec![0xff, 0xfe, 0x41, 0x00]
    );
}

#[test]
fn utf16le_encodes_astral_as_surrogate_pair() {
    assert_eq!(
        OutputEncoding::Utf16Le.encode("\u{1F600}"),
        vec![0xff, 0xfe, 0x3d, 0xd8, 0x00, 0xde]
    );
}

#[test]
fn encoding_names() {
    assert_eq!(OutputEncoding::Utf8.name(), "utf-8");
    assert_eq!(OutputEncoding::Utf16Le.to_string(), "utf-16le");
}

// =============================================================================
// Through the expander
// =============================================================================

#[test]
fn expansion_carries_destination_encoding() {
    let env = MapEnv::new();
    let expansion = Expander::builder()
        .template("[{{ var.K }}]")
        .inline_layer(layers! { "K" => "HKCU" })
        .env(&env)
        .destination(PathBuf::from("install.reg"))
        .build()
        .expand()
        .unwrap();

    assert_eq!(expansion.encoding, OutputEncoding::Utf16Le);
    let bytes = expansion.to_bytes();
    assert_eq!(&bytes[..2], &[0xff, 0xfe]);
    assert_eq!(bytes.len(), 2 + "[HKCU]".len() * 2);
}

#[test]
fn written_reg_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("setup.reg");

    let env = MapEnv::new();
    let expansion = Expander::builder()
        .template("Windows Registry Editor Version 5.00\r\n")
        .env(&env)
        .destination(dest.clone())
        .build()
        .expand()
        .unwrap();
    std::fs::write(&dest, expansion.to_bytes()).unwrap();

    let bytes = std::fs::read(&dest).unwrap();
    assert_eq!(&bytes[..2], &[0xff, 0xfe]);
    assert_eq!(bytes.len() % 2, 0);
}

#[test]
fn no_destination_defaults_to_utf8() {
    let env = MapEnv::new();
    let expansion = Expander::builder()
        .template("x")
        .env(&env)
        .build()
        .expand()
        .unwrap();
    assert_eq!(expansion.encoding, OutputEncoding::Utf8);
    assert_eq!(expansion.to_bytes(), b"x".to_vec());
}
