//! End-to-end: text in, passes, text out.

use std::io::Write;

use spirv_emit::{normalize, normalize_file, EmitKind, EmitOptions, Error};

const OUT_OF_ORDER: &str = "\
OpCapability Kernel
OpMemoryModel Physical64 OpenCL
OpName %3 \"main\"
OpTypeVoid %1
OpTypeFunction %2 %1
OpFunction %1 %3 None %2
OpLabel %20
OpBranch %22
OpLabel %21
OpReturn
OpLabel %22
OpBranch %21
OpFunctionEnd
";

fn plain() -> EmitOptions {
    EmitOptions {
        comments: false,
        ..EmitOptions::default()
    }
}

#[test]
fn test_blocks_are_reordered() {
    let out = normalize(OUT_OF_ORDER, "m", EmitKind::Blocks, &plain()).unwrap();
    assert_eq!(out, "main: %20 %22 %21\n");
}

#[test]
fn test_no_sort_keeps_input_order() {
    let options = EmitOptions {
        sort_blocks: false,
        ..plain()
    };
    let out = normalize(OUT_OF_ORDER, "m", EmitKind::Blocks, &options).unwrap();
    assert_eq!(out, "main: %20 %21 %22\n");
}

#[test]
fn test_asm_output_moves_whole_blocks() {
    let out = normalize(OUT_OF_ORDER, "m", EmitKind::Asm, &plain()).unwrap();
    assert!(
        out.contains("OpLabel %20\nOpBranch %22\nOpLabel %22\nOpBranch %21\nOpLabel %21\nOpReturn\n"),
        "{}",
        out
    );
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize(OUT_OF_ORDER, "m", EmitKind::Asm, &EmitOptions::default()).unwrap();
    let twice = normalize(&once, "m", EmitKind::Asm, &EmitOptions::default()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_header_names_module() {
    let out = normalize(OUT_OF_ORDER, "shader", EmitKind::Asm, &EmitOptions::default()).unwrap();
    assert!(out.starts_with("; SPIR-V\n; Module: shader\n"), "{}", out);
}

#[test]
fn test_diagnostic_codes() {
    let parse = normalize("OpBogus\n", "m", EmitKind::Asm, &plain()).unwrap_err();
    assert!(matches!(parse, Error::Parse(_)));
    assert_eq!(parse.diagnostic_code(), "E0005");

    let unsealed = "OpFunction %1 %2 None %3\nOpLabel %4\nOpNop\nOpFunctionEnd\n";
    let pass = normalize(unsealed, "m", EmitKind::Asm, &plain()).unwrap_err();
    assert_eq!(pass.diagnostic_code(), "E0200");
    assert!(pass.to_string().starts_with("[pass error]"), "{}", pass);
}

#[test]
fn test_validation_can_be_skipped() {
    let unsealed = "OpFunction %1 %2 None %3\nOpLabel %4\nOpNop\nOpFunctionEnd\n";
    let options = EmitOptions {
        validate: false,
        sort_blocks: false,
        ..plain()
    };
    let out = normalize(unsealed, "m", EmitKind::Asm, &options).unwrap();
    assert_eq!(out, unsealed);
}

#[test]
fn test_normalize_file_uses_stem() {
    let dir = std::env::temp_dir().join(format!("spirv-emit-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("kernel.spvasm");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(OUT_OF_ORDER.as_bytes())
        .unwrap();

    let out = normalize_file(&path, EmitKind::Asm, &EmitOptions::default(), None).unwrap();
    assert!(out.contains("; Module: kernel\n"), "{}", out);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_file_is_io_error() {
    let err = normalize_file(
        std::path::Path::new("/nonexistent/dir/x.spvasm"),
        EmitKind::Asm,
        &plain(),
        None,
    )
    .unwrap_err();
    assert_eq!(err.diagnostic_code(), "E0500");
}
