use super::*;

fn sample_image() -> Image {
    let settings = Settings {
        cores: [2, 1, 1],
        mem_number: 3,
        mem_size: 8,
        mem_map: vec![0, 2],
    };
    let variables = vec![vec![(2, 0), (2, 4)], vec![(0, 1)]];
    let banks = vec![(0, vec![0x00, 0x05]), (2, vec![0x32, 0x41, 0x05])];
    Image::from(settings, variables, banks)
}

#[test]
fn write_read() {
    let path = "test.mex";

    let image_orig = sample_image();

    write_file(path, &image_orig).unwrap();

    let image_read = read_file(path).unwrap();

    assert_eq!(image_orig, image_read);

    std::fs::remove_file(path).unwrap();
}

#[test]
fn layout() {
    let mut buffer = Vec::new();
    write(&mut buffer, &sample_image()).unwrap();

    assert_eq!(
        buffer,
        vec![
            2, 1, 1, 3, 8, // settings
            2, 0, 2, // core to bank map
            2, // variable count
            2, 2, 0, 2, 4, // sites of variable a
            1, 0, 1, // sites of variable b
            0, 2, 0x00, 0x05, // bank 0
            2, 3, 0x32, 0x41, 0x05, // bank 2
        ]
    );
}

#[test]
fn empty_bank_section() {
    let mut buffer = Vec::new();
    write(&mut buffer, &sample_image()).unwrap();
    buffer.truncate(17); // settings + map + variables only

    let image = read(&mut &buffer[..]).unwrap();
    assert!(image.banks().is_empty());
}

#[test]
fn truncated_bank() {
    let mut buffer = Vec::new();
    write(&mut buffer, &sample_image()).unwrap();
    buffer.pop(); // drop the final opcode byte

    let err = read(&mut &buffer[..]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}

#[test]
fn truncated_variables() {
    let mut buffer = Vec::new();
    write(&mut buffer, &sample_image()).unwrap();
    buffer.truncate(10);

    let err = read(&mut &buffer[..]).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
}
