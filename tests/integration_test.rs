//! Integration tests for PSG to VGM conversion
//!
//! These tests convert PSG images to files and verify the output using the
//! VgmReader/VgmJson models

use aypsg2vgm::convert::{convert_file, default_output_path, ConvertOptions};
use aypsg2vgm::psg::{PSG_MAGIC, PSG_METADATA_SIZE};
use aypsg2vgm::vgm::{VgmCommand, VgmJson, VgmReader};
use aypsg2vgm::Error;
use std::path::Path;
use tempfile::tempdir;

/// Build a PSG image from a token stream
fn psg(body: &[u8]) -> Vec<u8> {
    let mut data = PSG_MAGIC.to_vec();
    data.extend_from_slice(&[0; PSG_METADATA_SIZE]);
    data.extend_from_slice(body);
    data
}

/// Convert a PSG image through files and return the raw VGM bytes
fn convert_bytes(input: &[u8], options: &ConvertOptions) -> Result<Vec<u8>, Error> {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("test.psg");
    let output_path = dir.path().join("test.vgm");
    std::fs::write(&input_path, input).unwrap();

    convert_file(&input_path, &output_path, options)?;

    Ok(std::fs::read(&output_path).expect("Failed to read output VGM"))
}

/// Parse a VGM image into its JSON model
fn parse(data: &[u8]) -> VgmJson {
    let mut reader = VgmReader::new(data);
    let header = reader.parse_header().expect("Failed to parse header");
    let commands = reader.parse_commands(&header).expect("Failed to parse commands");
    VgmJson::new(&header, commands)
}

fn convert_and_parse(body: &[u8]) -> (Vec<u8>, VgmJson) {
    let data = convert_bytes(&psg(body), &ConvertOptions::default()).expect("Conversion failed");
    let vgm = parse(&data);
    (data, vgm)
}

/// Samples the PSG stream represents, computed directly from the tokens
fn reference_samples(body: &[u8]) -> u64 {
    let mut total = 0u64;
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            0xFE => {
                total += body[i + 1] as u64 * 4 * 882;
                i += 2;
            }
            0xFF => {
                total += 882;
                i += 1;
            }
            _ => i += 2,
        }
    }
    total
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

#[test]
fn test_round_trip_scenario() {
    let body = [0xFE, 0x01, 0x07, 0x3F, 0xFF];
    let (data, vgm) = convert_and_parse(&body);

    assert_eq!(
        vgm.commands,
        vec![
            VgmCommand::Wait16 { samples: 3528 },
            VgmCommand::Ay8910Write { reg: 0x07, data: 0x3F },
            VgmCommand::Wait882,
            VgmCommand::End,
        ]
    );
    assert_eq!(vgm.header.total_samples, 4410);
    assert_eq!(read_u32(&data, 0x04) as usize, data.len() - 4);
    assert_eq!(read_u32(&data, 0x18), 4410);
    assert_eq!(read_u32(&data, 0x74), 35468);
}

#[test]
fn test_header_fields() {
    let (data, vgm) = convert_and_parse(&[0xFF]);

    assert_eq!(&data[0..4], b"Vgm ");
    assert_eq!(vgm.version, "1.51");
    assert_eq!(read_u32(&data, 0x34), 0x4C);
    assert_eq!(data[0x78], 1);
    assert_eq!(data[0x79], 0);

    // Only the AY clock is set
    assert_eq!(vgm.header.chips.len(), 1);
    let ay = &vgm.header.chips["ay8910"];
    assert_eq!(ay.clock, 35468);
    assert_eq!(ay.chip_type, Some(1));
    assert!(vgm.header.loop_offset.is_none());
}

#[test]
fn test_eof_offset_matches_size() {
    for body in [
        &[][..],
        &[0xFF][..],
        &[0x00, 0x10, 0x01, 0x02, 0xFE, 0x40, 0xFF, 0xFF][..],
        &[0xFE, 0xFF, 0xFE, 0xFF, 0x0D, 0x0E][..],
    ] {
        let (data, vgm) = convert_and_parse(body);
        assert_eq!(vgm.header.file_size, data.len() as u64);
        assert_eq!(*data.last().unwrap(), 0x66);
    }
}

#[test]
fn test_total_samples_matches_reference() {
    let body = [
        0xFF, 0x08, 0x0F, 0xFE, 0x03, 0xFF, 0xFE, 0xFF, 0x00, 0xEE, 0xFE, 0x00, 0xFF,
    ];
    let (_, vgm) = convert_and_parse(&body);
    let expected = reference_samples(&body);
    assert_eq!(vgm.header.total_samples as u64, expected);
    assert_eq!(vgm.command_samples(), expected);
}

#[test]
fn test_zero_wait_run_emits_zero_wait() {
    let (_, vgm) = convert_and_parse(&[0xFE, 0x00]);
    assert_eq!(
        vgm.commands,
        vec![VgmCommand::Wait16 { samples: 0 }, VgmCommand::End]
    );
    assert_eq!(vgm.header.total_samples, 0);
}

#[test]
fn test_long_wait_run_split() {
    let (_, vgm) = convert_and_parse(&[0xFE, 0xFF]);
    let waits: Vec<u32> = vgm.commands.iter().filter_map(|c| c.wait_samples()).collect();
    assert_eq!(waits.len(), 14);
    assert!(waits[..13].iter().all(|&w| w == 0xFFFF));
    assert_eq!(waits.iter().sum::<u32>(), 899_640);
}

#[test]
fn test_register_write_bytes() {
    let (data, _) = convert_and_parse(&[0x07, 0x3F]);
    assert_eq!(&data[0x80..], &[0xA0, 0x07, 0x3F, 0x66]);
}

#[test]
fn test_chip_type_selects_frame_length() {
    let options = ConvertOptions {
        clock_rate: 1773400,
        chip_type: 2,
    };
    let data = convert_bytes(&psg(&[0xFF]), &options).unwrap();
    assert_eq!(data[0x78], 2);
    assert_eq!(read_u32(&data, 0x74), 29557);
    // Frame waits are always 882 samples regardless of chip type
    assert_eq!(read_u32(&data, 0x18), 882);
}

#[test]
fn test_bad_magic_is_format_error() {
    let mut input = psg(&[0xFF]);
    input[2] = 0x00;
    let err = convert_bytes(&input, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Format { offset: 0, .. }));
}

#[test]
fn test_truncated_register_write_is_reported() {
    let err = convert_bytes(&psg(&[0x07, 0x3F, 0x08]), &ConvertOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Truncated {
            offset: 19,
            context: "register value"
        }
    ));
    assert!(err.to_string().contains("0x13"));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = convert_file(
        &dir.path().join("missing.psg"),
        &dir.path().join("out.vgm"),
        &ConvertOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_default_output_next_to_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("song.psg");
    std::fs::write(&input, psg(&[0xFF])).unwrap();

    let output = default_output_path(&input);
    assert_eq!(output.parent(), Some(dir.path()));
    assert_eq!(output.file_name().and_then(|n| n.to_str()), Some("song.vgm"));

    convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    assert!(Path::new(&output).exists());
}
