use super::*;

fn size(width: u32, height: u32) -> PixelSize {
    PixelSize::new(width, height).unwrap()
}

#[test]
fn generation_increments() {
    assert_eq!(Generation(0).next(), Generation(1));
    assert_eq!(Generation(u64::MAX).next(), Generation(0));
}

#[test]
fn reply_delivers_outcome_over_channel() {
    let (tx, rx) = mpsc::channel();
    ProbeReply::new(Generation(3), "a.png".to_string(), tx).resolve(Ok(size(2, 1)));
    let outcome = rx.try_recv().unwrap();
    assert_eq!(outcome.generation, Generation(3));
    assert_eq!(outcome.src, "a.png");
    assert_eq!(outcome.result.unwrap(), size(2, 1));
}

#[test]
fn reply_to_dropped_receiver_is_ignored() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    ProbeReply::new(Generation(1), "a.png".to_string(), tx).resolve(Ok(size(1, 1)));
}

#[test]
fn dropped_reply_answers_with_source_error() {
    let (tx, rx) = mpsc::channel();
    drop(ProbeReply::new(Generation(5), "b.png".to_string(), tx));
    let outcome = rx.try_recv().unwrap();
    assert_eq!(outcome.generation, Generation(5));
    assert_eq!(outcome.src, "b.png");
    assert!(matches!(outcome.result, Err(GlassError::Source(_))));
    assert!(rx.try_recv().is_err());
}

#[test]
fn resolved_reply_sends_exactly_once() {
    let (tx, rx) = mpsc::channel();
    ProbeReply::new(Generation(1), "a.png".to_string(), tx).resolve(Ok(size(1, 1)));
    assert_eq!(rx.try_iter().count(), 1);
}

#[test]
fn manual_prober_resolves_out_of_order() {
    let (tx, rx) = mpsc::channel();
    let mut prober = ManualProber::new();
    let handle = prober.clone();
    prober.probe(ProbeReply::new(Generation(1), "a".to_string(), tx.clone()));
    prober.probe(ProbeReply::new(Generation(2), "b".to_string(), tx));
    assert_eq!(handle.pending_sources(), vec!["a".to_string(), "b".to_string()]);

    assert!(handle.resolve("b", Ok(size(4, 3))));
    assert!(!handle.resolve("b", Ok(size(4, 3))));
    assert!(handle.resolve("a", Err(GlassError::decode("broken"))));
    assert_eq!(handle.pending_len(), 0);

    let first = rx.try_recv().unwrap();
    assert_eq!(first.generation, Generation(2));
    let second = rx.try_recv().unwrap();
    assert_eq!(second.generation, Generation(1));
    assert!(second.result.is_err());
}

#[test]
fn resolve_all_answers_everything() {
    let (tx, rx) = mpsc::channel();
    let mut prober = ManualProber::new();
    prober.probe(ProbeReply::new(Generation(1), "a".to_string(), tx.clone()));
    prober.probe(ProbeReply::new(Generation(2), "b".to_string(), tx));
    assert_eq!(prober.resolve_all(|_| Ok(size(1, 1))), 2);
    assert_eq!(rx.try_iter().count(), 2);
}

#[test]
fn probe_source_rejects_empty_and_remote() {
    assert!(probe_source("", std::path::Path::new(".")).is_err());
    assert!(probe_source("https://example.com/a.png", std::path::Path::new(".")).is_err());
}
