//! Archive reader and entry view tests against built fixtures

mod common;

use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use std::thread;

use common::{build_archive, build_archive_with_table_at};
use dl1x::{Archive, Error, LocalFileReader};

#[test]
fn test_list_in_table_order() {
    let bytes = build_archive(&[
        ("zeta.bmp", b"zzzz"),
        ("alpha.txt", b"aa"),
        ("MIXED.Dat", b"m"),
    ]);
    let archive = Archive::open(Arc::new(bytes)).unwrap();

    assert_eq!(archive.header().entry_count, 3);
    assert_eq!(
        archive.list().collect::<Vec<_>>(),
        vec!["ZETA.BMP", "ALPHA.TXT", "MIXED.DAT"]
    );
}

#[test]
fn test_sizes_cover_data_region() {
    let entries: [(&str, &[u8]); 4] = [
        ("a", b"0123456789"),
        ("b", b""),
        ("c", b"xyz"),
        ("d", &[7u8; 300]),
    ];
    // Table placed well after the data, with a gap in between
    let archive = Archive::open(Arc::new(build_archive_with_table_at(&entries, 0x400))).unwrap();

    let total: u64 = archive.list().map(|n| archive.stat(n).size).sum();
    let (start, end) = archive.data_region();
    assert_eq!(start, 0x10);
    assert_eq!(end - start, total);

    let (table_start, table_end) = archive.table_region();
    assert_eq!((table_start, table_end), (0x400, 0x440));
    assert!(end <= table_start);
}

#[test]
fn test_entry_contents() {
    let bytes = build_archive(&[("first", b"hello"), ("second", b"world!")]);
    let archive = Archive::open(Arc::new(bytes)).unwrap();

    assert_eq!(archive.open_entry("first").unwrap().read_all().unwrap(), b"hello");
    assert_eq!(archive.open_entry("SECOND").unwrap().read_all().unwrap(), b"world!");
}

#[test]
fn test_unknown_entry() {
    let archive = Archive::open(Arc::new(build_archive(&[("a.txt", b"x")]))).unwrap();

    assert!(matches!(archive.open_entry("b.txt"), Err(Error::EntryNotFound(_))));
    assert!(matches!(archive.descriptor("a.tx"), Err(Error::EntryNotFound(_))));
    assert!(!archive.stat("b.txt").exists);
}

#[test]
fn test_bad_magic_is_invalid_format() {
    let mut bytes = build_archive(&[("a", b"abc")]);
    bytes[..8].copy_from_slice(b"PK\x03\x04\0\0\0\0");

    match Archive::open(Arc::new(bytes)) {
        Err(Error::InvalidFormat { .. }) => {}
        Err(e) => panic!("wrong error kind: {e}"),
        Ok(_) => panic!("archive with bad magic was accepted"),
    }
}

#[test]
fn test_truncated_table() {
    let mut bytes = build_archive(&[("a", b"abc"), ("b", b"def")]);
    // Claim five entries while only two records follow the table offset
    bytes[8..10].copy_from_slice(&5u16.to_le_bytes());

    assert!(matches!(
        Archive::open(Arc::new(bytes)),
        Err(Error::TruncatedInput { expected: 80, actual: 32, .. })
    ));
}

#[test]
fn test_oversized_entry_fails_on_read() {
    let mut bytes = build_archive(&[("big", b"abcd")]);
    let len = bytes.len();
    bytes[len - 4..].copy_from_slice(&1000i32.to_le_bytes());

    // Sizes are trusted at open time
    let archive = Archive::open(Arc::new(bytes)).unwrap();
    assert_eq!(archive.stat("big").size, 1000);

    assert!(matches!(
        archive.open_entry("big").unwrap().read_all(),
        Err(Error::TruncatedInput { .. })
    ));
}

#[test]
fn test_views_do_not_share_cursor() {
    let archive = Archive::open(Arc::new(build_archive(&[("a", b"abcdefgh")]))).unwrap();

    let mut first = archive.open_entry("a").unwrap();
    let mut second = archive.open_entry("a").unwrap();

    first.seek(SeekFrom::Start(6)).unwrap();
    let mut buf = [0u8; 2];
    second.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ab");
    first.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"gh");
}

#[test]
fn test_archive_is_shareable_across_threads() {
    let bytes = build_archive(&[("one", b"1111"), ("two", b"22222222")]);
    let archive = Arc::new(Archive::open(Arc::new(bytes)).unwrap());

    let handles: Vec<_> = ["one", "two"]
        .into_iter()
        .map(|name| {
            let archive = archive.clone();
            thread::spawn(move || archive.open_entry(name).unwrap().read_all().unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![b"1111".to_vec(), b"22222222".to_vec()]);
}

#[test]
fn test_open_local_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(&build_archive(&[("data.bin", &[1, 2, 3]), ("x", b"yz")]))
        .unwrap();
    tmp.flush().unwrap();

    let reader = Arc::new(LocalFileReader::new(tmp.path()).unwrap());
    let archive = Archive::open(reader).unwrap();
    assert_eq!(archive.len(), 2);
    assert_eq!(archive.open_entry("X").unwrap().read_all().unwrap(), b"yz");
}
