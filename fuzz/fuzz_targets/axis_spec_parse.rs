#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Keep allocations bounded: shorthand can request up to u32::MAX bins.
    if text.len() > 256 {
        return;
    }

    let Ok(segments) = hg_hist::shorthand::parse_segments(text) else {
        return;
    };
    let requested: usize = segments
        .iter()
        .map(|s| match s {
            hg_hist::Segment::Uniform { nbins, .. } | hg_hist::Segment::Step { nbins, .. } => *nbins,
            _ => 1,
        })
        .fold(0usize, |a, b| a.saturating_add(b));
    if requested > 1 << 16 {
        return;
    }

    if let Ok(axis) = hg_hist::Axis::from_segments(&segments) {
        assert!(axis.edges().windows(2).all(|w| w[0] < w[1]));
        for x in [f64::NEG_INFINITY, axis.min(), axis.max(), f64::NAN, f64::INFINITY] {
            assert!(axis.find_bin_index(x) <= axis.nbins() + 1);
        }
        assert_eq!(axis.find_bin_index(axis.max()), axis.nbins());
    }
});
