use super::*;
use frames::encode_f32_le;

fn histogram_payload(values: &[f32]) -> Payload {
    let mut data = b"1:".to_vec();
    data.extend(encode_f32_le(values));
    Payload::Binary { data, offset: 2 }
}

#[test]
fn session_view_defaults_to_disconnected() {
    let view = SessionView::default();
    assert_eq!(view.connection_status, ConnectionStatus::Disconnected);
    assert!(view.output.is_empty());
    assert_eq!(view.canvas, CanvasFeed::default());
}

#[test]
fn snapshot_parses_shape_header() {
    let snap = HistogramSnapshot::from_floats(&[2.0, 1.0, 5.0, 7.0]).expect("snapshot");
    assert_eq!(snap.nx, 2);
    assert_eq!(snap.ny, 1);
    assert_eq!(snap.bins, vec![5.0, 7.0]);
    assert_eq!(snap.total(), 12.0);
    assert_eq!(snap.peak(), Some((1, 0, 7.0)));
}

#[test]
fn snapshot_rejects_bad_shapes() {
    assert!(HistogramSnapshot::from_floats(&[]).is_none());
    assert!(HistogramSnapshot::from_floats(&[2.0]).is_none());
    assert!(HistogramSnapshot::from_floats(&[2.0, 2.0, 1.0]).is_none());
    assert!(HistogramSnapshot::from_floats(&[-1.0, 0.0]).is_none());
    assert!(HistogramSnapshot::from_floats(&[f32::NAN, 0.0]).is_none());
}

#[test]
fn empty_histogram_has_no_peak() {
    let snap = HistogramSnapshot::from_floats(&[0.0, 0.0]).expect("snapshot");
    assert_eq!(snap.peak(), None);
}

#[test]
fn peak_reports_row_major_coordinates() {
    let snap = HistogramSnapshot::from_floats(&[3.0, 2.0, 0.0, 0.0, 0.0, 0.0, 9.0, 0.0]).expect("snapshot");
    assert_eq!(snap.peak(), Some((1, 1, 9.0)));
}

#[test]
fn feed_ignores_frames_before_bind() {
    let mut feed = CanvasFeed::default();
    feed.apply(ChannelId(1), &histogram_payload(&[1.0, 1.0, 4.0]));
    assert_eq!(feed.frames, 0);
    assert_eq!(feed.summary(), "no channel");
}

#[test]
fn feed_decodes_bound_channel_frames() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    assert_eq!(feed.summary(), "channel 1: waiting for data");

    feed.apply(ChannelId(1), &histogram_payload(&[2.0, 1.0, 1.0, 3.0]));
    assert_eq!(feed.frames, 1);
    assert_eq!(feed.summary(), "channel 1: 1 frames, 2x1 bins, total 4, peak 3 at (1, 0)");
}

#[test]
fn feed_ignores_other_channels() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    feed.apply(ChannelId(2), &histogram_payload(&[1.0, 1.0, 4.0]));
    assert_eq!(feed.frames, 0);
}

#[test]
fn feed_keeps_last_good_snapshot_on_bad_frame() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    feed.apply(ChannelId(1), &histogram_payload(&[1.0, 1.0, 4.0]));
    feed.apply(ChannelId(1), &Payload::Binary { data: vec![b'1', b':', 0, 0, 0], offset: 2 });

    assert_eq!(feed.frames, 1);
    assert!(feed.snapshot.is_some());
    assert!(feed.last_error.as_deref().is_some_and(|e| e.contains("f32")));
}

#[test]
fn feed_reports_float_arrays_that_are_not_histograms() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    feed.apply(ChannelId(1), &histogram_payload(&[5.0, 5.0, 1.0]));
    assert_eq!(feed.last_error.as_deref(), Some("3 values do not form a histogram"));
}

#[test]
fn feed_ignores_empty_frames() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    feed.apply(ChannelId(1), &histogram_payload(&[1.0, 1.0, 4.0]));
    feed.apply(ChannelId(1), &histogram_payload(&[]));
    feed.apply(ChannelId(1), &Payload::text(""));

    assert_eq!(feed.frames, 1);
    assert_eq!(feed.last_error, None);
    assert_eq!(feed.last_text, None);
    assert!(feed.snapshot.is_some());
}

#[test]
fn feed_records_channel_text() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(3));
    feed.apply(ChannelId(3), &Payload::text("READY"));
    assert_eq!(feed.last_text.as_deref(), Some("READY"));
}

#[test]
fn rebinding_resets_the_feed() {
    let mut feed = CanvasFeed::default();
    feed.bind(ChannelId(1));
    feed.apply(ChannelId(1), &histogram_payload(&[1.0, 1.0, 4.0]));
    feed.bind(ChannelId(2));
    assert_eq!(feed.frames, 0);
    assert_eq!(feed.snapshot, None);
    assert_eq!(feed.channel, Some(ChannelId(2)));
}
