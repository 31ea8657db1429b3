use super::*;
use crate::assets::probe::ManualProber;
use crate::component::content::ContentNode;
use crate::foundation::core::PixelSize;
use crate::foundation::error::GlassError;

fn component() -> (GlassText, ManualProber) {
    let prober = ManualProber::new();
    (GlassText::new(prober.clone()), prober)
}

fn size(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

#[test]
fn attach_applies_defaults_without_any_attribute() {
    let (mut c, prober) = component();
    c.attach();

    let v = c.view();
    assert_eq!(v.glass.filter.as_deref(), Some("blur(10px) brightness(0.8)"));
    assert_eq!(v.sharp.filter, None);
    assert_eq!(v.sharp.object_fit, "cover");
    assert_eq!(v.glass.object_fit, "cover");
    assert_eq!(v.glyph.style.x, "50%");
    assert_eq!(v.glyph.style.font_size, "100px");
    assert_eq!(v.glyph.text, "");
    assert_eq!(v.host, HostStyle::default());
    assert_eq!(prober.pending_len(), 0);
}

#[test]
fn changes_while_detached_are_not_dispatched() {
    let (mut c, _prober) = component();
    c.set_attribute("blur", "4");
    assert_eq!(c.view().glass.filter, None);
    assert_eq!(c.stats().filter_updates, 0);

    c.attach();
    assert_eq!(c.view().glass.filter.as_deref(), Some("blur(4px) brightness(0.8)"));
}

#[test]
fn dispatch_touches_only_the_affected_category() {
    let (mut c, _prober) = component();
    c.attach();
    let before = *c.stats();

    c.set_attribute("font-weight", "300");
    let after = *c.stats();
    assert_eq!(after.text_style_updates, before.text_style_updates + 1);
    assert_eq!(after.filter_updates, before.filter_updates);
    assert_eq!(after.fit_updates, before.fit_updates);
    assert_eq!(after.image_updates, before.image_updates);

    c.set_attribute("object-fit", "contain");
    assert_eq!(c.stats().fit_updates, before.fit_updates + 1);
    assert_eq!(c.view().sharp.object_fit, "contain");
    assert_eq!(c.view().glass.object_fit, "contain");
}

#[test]
fn identical_assignment_does_not_recompute() {
    let (mut c, _prober) = component();
    c.attach();
    c.set_attribute("text-x", "25%");
    let once = *c.stats();
    c.set_attribute("text-x", "25%");
    assert_eq!(*c.stats(), once);
    assert_eq!(c.view().glyph.style.x, "25%");
}

#[test]
fn unknown_attributes_never_dispatch() {
    let (mut c, _prober) = component();
    c.attach();
    let before = *c.stats();
    c.set_attribute("data-demo", "1");
    assert_eq!(*c.stats(), before);
    assert_eq!(c.attribute("data-demo"), Some("1"));
}

#[test]
fn removing_attribute_restores_default() {
    let (mut c, _prober) = component();
    c.attach();
    c.set_attribute("font-family", "serif");
    assert_eq!(c.view().glyph.style.font_family, "serif");
    c.remove_attribute("font-family");
    assert_eq!(c.view().glyph.style.font_family, "sans-serif");
}

#[test]
fn probe_success_reserves_padding_box() {
    let (mut c, prober) = component();
    c.attach();
    c.set_attribute("image-src", "photo.jpg");
    assert_eq!(c.view().sharp.src, "photo.jpg");
    assert_eq!(c.view().glass.src, "photo.jpg");
    assert!(c.probe_pending());
    assert_eq!(c.view().host, HostStyle::default());

    assert!(prober.resolve("photo.jpg", Ok(size(400, 300))));
    assert_eq!(c.pump(), 1);
    assert_eq!(c.view().host.height.as_deref(), Some("0"));
    assert_eq!(c.view().host.padding_top.as_deref(), Some("75%"));
    assert!(!c.probe_pending());
}

#[test]
fn probe_failure_clears_previous_reservation() {
    let (mut c, prober) = component();
    c.attach();
    c.set_attribute("image-src", "a.jpg");
    prober.resolve("a.jpg", Ok(size(200, 100)));
    c.pump();
    assert_eq!(c.view().aspect_ratio, Some(0.5));

    c.set_attribute("image-src", "b.jpg");
    prober.resolve("b.jpg", Err(GlassError::decode("broken")));
    c.pump();
    assert_eq!(c.view().host, HostStyle::default());
    assert_eq!(c.view().aspect_ratio, None);
}

#[test]
fn clearing_source_removes_reservation_synchronously() {
    let (mut c, prober) = component();
    c.attach();
    c.set_attribute("image-src", "a.jpg");
    prober.resolve("a.jpg", Ok(size(100, 100)));
    c.pump();
    assert!(c.view().host.padding_top.is_some());

    c.set_attribute("image-src", "");
    assert_eq!(c.view().host, HostStyle::default());
    assert!(!c.probe_pending());
    assert_eq!(c.view().sharp.src, "");
}

#[test]
fn detach_releases_observers_and_invalidates_probes() {
    let (mut c, prober) = component();
    c.attach();
    c.set_attribute("image-src", "a.jpg");
    c.detach();
    assert_eq!(c.lifecycle(), Lifecycle::Detached);
    assert!(!c.content().is_observed());

    prober.resolve("a.jpg", Ok(size(100, 50)));
    c.pump();
    assert_eq!(c.view().aspect_ratio, None);
    assert_eq!(c.stats().stale_probes, 1);

    let before = *c.stats();
    c.set_text_content("late");
    c.set_attribute("blur", "1");
    assert_eq!(*c.stats(), before);
    assert_eq!(c.view().glyph.text, "");
}

#[test]
fn reattach_runs_a_full_pass() {
    let (mut c, _prober) = component();
    c.attach();
    c.detach();
    c.set_text_content(" again ");
    c.set_attribute("brightness", "2");
    c.attach();
    assert_eq!(c.view().glyph.text, "again");
    assert_eq!(c.view().glass.filter.as_deref(), Some("blur(10px) brightness(2)"));
    assert!(c.content().is_observed());
}

#[test]
fn nested_content_mutations_are_mirrored() {
    let (mut c, _prober) = component();
    c.set_text_content("  HELLO  ");
    c.attach();
    assert_eq!(c.view().glyph.text, "HELLO");

    c.mutate_content(|tree| {
        tree.append(ContentNode::element("b", vec![ContentNode::text(" WORLD ")]));
    });
    assert_eq!(c.view().glyph.text, "HELLO   WORLD");

    c.mutate_content(|tree| tree.set_character_data(&[1, 0], "!").unwrap());
    assert_eq!(c.view().glyph.text, "HELLO  !");

    c.mutate_content(|tree| {
        tree.remove(&[0]).unwrap();
    });
    assert_eq!(c.view().glyph.text, "!");
}

#[test]
fn mutation_batch_recomputes_once() {
    let (mut c, _prober) = component();
    c.attach();
    let before = c.stats().text_content_updates;
    c.mutate_content(|tree| {
        tree.append(ContentNode::text("a"));
        tree.append(ContentNode::text("b"));
    });
    assert_eq!(c.stats().text_content_updates, before + 1);
    assert_eq!(c.view().glyph.text, "ab");
}
