use super::*;
use crate::foundation::core::Fps;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "epicycles_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 3,
        height: 2,
        fps: Fps::default(),
    }
}

#[test]
fn writes_numbered_pngs_that_decode_back() {
    let dir = temp_dir("png_sequence");
    let mut sink = PngSequenceSink::new(PngSequenceOpts::new(&dir));
    sink.begin(cfg()).unwrap();

    let mut frame = FrameRGBA::new(3, 2);
    frame.put(2, 1, [10, 20, 30, 255]);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(7), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("frame_00000.png").exists());
    assert!(dir.join("frame_00007.png").exists());

    let img = image::open(dir.join("frame_00007.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 255]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn refuses_to_overwrite_when_asked() {
    let dir = temp_dir("png_no_overwrite");
    let mut opts = PngSequenceOpts::new(&dir);
    opts.overwrite = false;

    let mut first = PngSequenceSink::new(opts.clone());
    first.begin(cfg()).unwrap();
    first.push_frame(FrameIndex(0), &FrameRGBA::new(3, 2)).unwrap();
    first.end().unwrap();

    let mut second = PngSequenceSink::new(opts);
    second.begin(cfg()).unwrap();
    assert!(matches!(
        second.push_frame(FrameIndex(0), &FrameRGBA::new(3, 2)),
        Err(EpicycleError::Validation(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn end_without_begin_is_a_state_error() {
    let mut sink = PngSequenceSink::new(PngSequenceOpts::new(temp_dir("png_unused")));
    assert!(matches!(sink.end(), Err(EpicycleError::State(_))));
}
