// tests/record_decoder_props.rs

use proptest::prelude::*;
use parlint::lint::RecordDecoder;

// Records with paths that never contain the delimiters, flags drawn from a
// mix of "skip" and "do not skip" spellings.
fn stream_strategy() -> impl Strategy<Value = Vec<u8>> {
    let record = ("[a-z0-9_/é-]{1,12}\\.php", prop_oneof![Just("1"), Just("0"), Just(""), Just("x")]);
    proptest::collection::vec(record, 0..20).prop_map(|records| {
        let mut stream = Vec::new();
        for (path, flag) in records {
            stream.extend_from_slice(format!("{path};{flag}\n").as_bytes());
        }
        stream
    })
}

fn feed_in_pieces(stream: &[u8], cuts: &[usize]) -> RecordDecoder {
    let mut cuts: Vec<usize> = cuts.iter().map(|c| c % (stream.len() + 1)).collect();
    cuts.sort_unstable();

    let mut decoder = RecordDecoder::new();
    let mut start = 0;
    for cut in cuts {
        decoder = decoder.feed(&stream[start..cut]);
        start = cut;
    }
    decoder.feed(&stream[start..])
}

proptest! {
    #[test]
    fn chunk_boundaries_do_not_change_the_result(
        stream in stream_strategy(),
        cuts in proptest::collection::vec(any::<usize>(), 0..16),
    ) {
        let whole = RecordDecoder::new().feed(&stream);
        let pieces = feed_in_pieces(&stream, &cuts);

        prop_assert_eq!(pieces.records(), whole.records());
        prop_assert_eq!(pieces.carry(), whole.carry());
    }

    #[test]
    fn one_byte_at_a_time_matches_a_single_chunk(
        stream in stream_strategy(),
        tail in "[a-z;]{0,6}",
    ) {
        let mut stream = stream;
        stream.extend_from_slice(tail.as_bytes());

        let whole = RecordDecoder::new().feed(&stream).finish();
        let bytewise = stream
            .iter()
            .fold(RecordDecoder::new(), |decoder, byte| decoder.feed(std::slice::from_ref(byte)))
            .finish();

        prop_assert_eq!(bytewise, whole);
    }
}
