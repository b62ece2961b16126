//! The async entry point agrees with the slice path.

use ssz_decoder::ErrorKind;
use ssz_driver::{compute_root_from_async_reader, compute_root_from_slice};
use ssz_tests::u64_list;
use ssz_types::Schema;
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn async_list_matches_slice() {
    let schema = Schema::list(Schema::basic(8));
    let bytes = u64_list(0..500);
    let expected = compute_root_from_slice(&schema, &bytes).unwrap();
    let root = compute_root_from_async_reader(&schema, &bytes[..]).await.unwrap();
    assert_eq!(root, expected);
}

#[tokio::test]
async fn async_reader_fed_in_pieces() {
    let schema = Schema::container(vec![Schema::basic(8), Schema::bytes()]);
    let mut bytes = u64_list([42]);
    bytes.extend_from_slice(&[12, 0, 0, 0]);
    bytes.extend((0..200u8).collect::<Vec<_>>());
    let expected = compute_root_from_slice(&schema, &bytes).unwrap();

    let (mut tx, rx) = tokio::io::duplex(7);
    let payload = bytes.clone();
    let writer = tokio::spawn(async move {
        for piece in payload.chunks(5) {
            tx.write_all(piece).await.unwrap();
        }
    });
    let root = compute_root_from_async_reader(&schema, rx).await.unwrap();
    writer.await.unwrap();
    assert_eq!(root, expected);
}

#[tokio::test]
async fn async_rejects_non_canonical() {
    let err = compute_root_from_async_reader(&Schema::basic(8), &[0u8; 7][..])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NonCanonical);
}
