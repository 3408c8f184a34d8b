//! Fixture builders shared by the integration tests

#![allow(dead_code)]

/// DL1 archive image with the entry table placed after the data
pub fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let data_len: usize = entries.iter().map(|(_, d)| d.len()).sum();
    build_archive_with_table_at(entries, 16 + data_len)
}

/// DL1 archive image with the entry table at `table_offset`; the gap
/// between data and table (if any) is zero-filled
pub fn build_archive_with_table_at(entries: &[(&str, &[u8])], table_offset: usize) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"DL1.0\x1A\0\0");
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(&(table_offset as i32).to_le_bytes());
    for (_, data) in entries {
        out.extend_from_slice(data);
    }
    assert!(out.len() <= table_offset, "table would overlap entry data");
    out.resize(table_offset, 0);
    for (name, data) in entries {
        let mut field = [0u8; 12];
        field[..name.len()].copy_from_slice(name.as_bytes());
        out.extend_from_slice(&field);
        out.extend_from_slice(&(data.len() as i32).to_le_bytes());
    }
    out
}

/// LZ buffer wrapping an already-encoded stream body
pub fn lz_stream(uncompressed_size: usize, body: &[u8]) -> Vec<u8> {
    let mut out = b"LZ".to_vec();
    out.extend_from_slice(&((10 + body.len()) as i32).to_le_bytes());
    out.extend_from_slice(&(uncompressed_size as i32).to_le_bytes());
    out.extend_from_slice(body);
    out
}

/// LZ buffer storing `data` as literals only (every control byte 0xFF)
pub fn lz_literals(data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    for chunk in data.chunks(8) {
        body.push(0xFF);
        body.extend_from_slice(chunk);
    }
    lz_stream(data.len(), &body)
}
