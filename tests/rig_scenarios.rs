use climb_rig::{
    Color, Configurable, DragState, JointId, JointKind, LimbId, Point, PointerEvent, Primitive,
    Rig, RigConfig, RigError, Snapshotter, StyleProfile, StyleTarget,
};

/// Small deterministic generator so drag sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let unit = (self.0 >> 40) as f32 / (1u64 << 24) as f32;
        lo + unit * (hi - lo)
    }

    fn next_joint(&mut self) -> JointId {
        JointId::ALL[(self.next_f32(0.0, JointId::COUNT as f32) as usize).min(JointId::COUNT - 1)]
    }
}

fn drag_by(rig: &mut Rig, joint: JointId, delta: Point) {
    let start = rig.position(joint);
    rig.on_drag_start(joint, start).unwrap();
    rig.on_drag_end(start + delta).unwrap();
}

fn assert_in_bounds(rig: &Rig) {
    let r = rig.joint_radius();
    let size = rig.surface();
    for joint in rig.joints() {
        let p = joint.position;
        assert!(p.x >= r && p.x <= size.width - r, "{} x={} out of bounds", joint.id, p.x);
        assert!(p.y >= r && p.y <= size.height - r, "{} y={} out of bounds", joint.id, p.y);
    }
}

fn assert_limbs_follow_joints(rig: &Rig) {
    for limb in rig.limbs() {
        let (from, to) = limb.id.endpoints();
        assert_eq!(limb.segment.from, rig.position(from), "{} start", limb.id);
        assert_eq!(limb.segment.to, rig.position(to), "{} end", limb.id);
    }
}

#[test]
fn head_drag_moves_only_its_limb() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    let before: Vec<_> = rig.limbs().iter().map(|l| l.segment).collect();

    drag_by(&mut rig, JointId::Head, Point::new(50.0, 50.0));

    assert_eq!(rig.position(JointId::Head), Point::new(250.0, 130.0));
    assert_eq!(rig.limb(LimbId::HeadNeck).segment.from, Point::new(250.0, 130.0));
    assert_eq!(rig.limb(LimbId::HeadNeck).segment.to, Point::new(200.0, 120.0));
    for limb in rig.limbs().iter().filter(|l| l.id != LimbId::HeadNeck) {
        assert_eq!(limb.segment, before[limb.id.index()], "{} moved", limb.id);
    }

    drag_by(&mut rig, JointId::Head, Point::new(10_000.0, 0.0));
    assert_eq!(rig.position(JointId::Head), Point::new(387.5, 130.0));
}

#[test]
fn random_drags_keep_joints_in_bounds() {
    let mut rig = Rig::new(320.0, 568.0).unwrap();
    let mut rng = Lcg(7);

    for _ in 0..200 {
        let joint = rng.next_joint();
        let start = rig.position(joint);
        rig.on_drag_start(joint, start).unwrap();
        let mut pointer = start;
        for _ in 0..5 {
            let step = Point::new(rng.next_f32(-400.0, 400.0), rng.next_f32(-700.0, 700.0));
            pointer = pointer + step;
            rig.on_drag_move(pointer).unwrap();
            assert_in_bounds(&rig);
        }
        rig.on_drag_end(pointer).unwrap();
        assert_in_bounds(&rig);
        assert_limbs_follow_joints(&rig);
    }
}

#[test]
fn topology_survives_drags_and_styling() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    let mut rng = Lcg(42);
    for _ in 0..50 {
        let joint = rng.next_joint();
        let delta = Point::new(rng.next_f32(-50.0, 50.0), rng.next_f32(-50.0, 50.0));
        drag_by(&mut rig, joint, delta);
    }
    rig.set_joint_color(Color::BLUE);
    rig.set_limb_color(Color::WHITE);

    assert_eq!(rig.joints().len(), JointId::COUNT);
    assert_eq!(rig.limbs().len(), LimbId::COUNT);
    for (joint, id) in rig.joints().iter().zip(JointId::ALL) {
        assert_eq!(joint.id, id);
    }
    for (limb, id) in rig.limbs().iter().zip(LimbId::ALL) {
        assert_eq!(limb.id, id);
        assert_eq!(limb.endpoints, id.endpoints());
    }
    assert_limbs_follow_joints(&rig);
}

#[test]
fn joint_color_leaves_glyphs_and_limbs() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    rig.set_joint_color(Color::BLUE);

    for joint in rig.joints() {
        match &joint.kind {
            JointKind::Disc(color) => assert_eq!(*color, Color::BLUE),
            JointKind::Glyph(symbol) => {
                assert_eq!(Some(symbol.as_str()), joint.id.default_glyph());
            }
        }
    }
    assert!(rig.limbs().iter().all(|l| l.color == Color::BLACK));
}

#[test]
fn limb_color_leaves_joints() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    rig.apply_style_hex(StyleTarget::Limbs, "#00ff00").unwrap();

    assert!(rig.limbs().iter().all(|l| l.color == Color::rgb(0, 255, 0)));
    assert!(
        rig.joints()
            .iter()
            .filter_map(|j| j.kind.color())
            .all(|c| c == Color::RED)
    );
}

#[test]
fn missing_color_keeps_style() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    rig.set_limb_color(Color::BLUE);

    let err = rig.apply_style(StyleTarget::Limbs, None).unwrap_err();
    assert!(matches!(err, RigError::InvalidColor(_)));
    assert_eq!(rig.limb_color(), Color::BLUE);

    assert!(rig.apply_style_hex(StyleTarget::Joints, "not-a-color").is_err());
    assert_eq!(rig.joint_color(), Color::RED);
}

#[test]
fn render_is_stable_and_ordered() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    drag_by(&mut rig, JointId::LeftKnee, Point::new(-30.0, 12.0));

    let first = rig.render();
    let second = rig.render();
    assert_eq!(first, second);
    assert_eq!(first.len(), JointId::COUNT + LimbId::COUNT);

    let split = first.iter().position(Primitive::is_limb).unwrap();
    assert_eq!(split, JointId::COUNT);
    assert!(first[..split].iter().all(Primitive::is_joint));
    assert!(first[split..].iter().all(Primitive::is_limb));

    let glyphs = first
        .iter()
        .filter(|p| matches!(p, Primitive::Glyph { .. }))
        .count();
    assert_eq!(glyphs, 5);
}

#[test]
fn render_mid_drag_shows_current_geometry() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    let start = rig.position(JointId::Torso);
    rig.on_drag_start(JointId::Torso, start).unwrap();
    rig.on_drag_move(start + Point::new(0.0, 40.0)).unwrap();

    let moved = Point::new(200.0, 320.0);
    let primitives = rig.render();
    let torso = &primitives[JointId::Torso.index()];
    assert!(matches!(torso, Primitive::Disc { center, .. } if *center == moved));
    let neck_torso = &primitives[JointId::COUNT + LimbId::NeckTorso.index()];
    assert!(matches!(neck_torso, Primitive::Line { segment, .. } if segment.to == moved));
    assert_eq!(rig.drag_state().active_joint(), Some(JointId::Torso));
}

#[test]
fn pointer_events_drive_a_full_gesture() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    let hand = rig.position(JointId::RightHand);

    let events = [
        PointerEvent::Start {
            joint: JointId::RightHand.index(),
            position: hand,
        },
        PointerEvent::Move {
            position: hand + Point::new(5.0, 0.0),
        },
        PointerEvent::Move {
            position: hand + Point::new(10.0, -10.0),
        },
        PointerEvent::End {
            position: hand + Point::new(20.0, -20.0),
        },
    ];
    let mut moves = Vec::new();
    for event in events {
        if let Some(m) = rig.handle_pointer(event).unwrap() {
            moves.push(m);
        }
    }

    assert_eq!(moves.len(), 3);
    assert_eq!(moves[2].position, hand + Point::new(20.0, -20.0));
    assert_eq!(moves[2].limbs, vec![LimbId::RightElbowRightHand]);
    assert!(rig.drag_state().is_idle());
    assert!(matches!(
        rig.handle_pointer(PointerEvent::Move { position: hand }),
        Err(RigError::NotDragging)
    ));
}

#[test]
fn bad_host_input_leaves_rig_untouched() {
    let mut rig = Rig::new(400.0, 800.0).unwrap();
    let start = rig.position(JointId::Torso);
    rig.on_drag_start(JointId::Torso, start).unwrap();
    let before = rig.render();

    assert!(rig.on_drag_move(Point::new(f32::NAN, f32::NAN)).is_err());
    assert!(rig.apply_style_hex(StyleTarget::Joints, "#abcde€").is_err());
    assert!(rig.apply_style_hex(StyleTarget::Limbs, "€").is_err());
    assert_eq!(rig.render(), before);
    assert_eq!(
        rig.drag_state(),
        DragState::Dragging {
            joint: JointId::Torso,
            last_pointer: start,
        }
    );

    rig.on_drag_end(start + Point::new(1.0, 1.0)).unwrap();
    assert_eq!(rig.position(JointId::Torso), start + Point::new(1.0, 1.0));
}

#[test]
fn config_and_profile_round_trip_through_json() {
    let config = RigConfig::without_glyphs().with_joint_size(30.0);
    let restored = RigConfig::from_json(&config.to_json().unwrap()).unwrap();
    let mut rig = Rig::with_config(400.0, 800.0, &restored).unwrap();
    assert_eq!(rig.joint_radius(), 15.0);
    assert!(rig.joints().iter().all(|j| j.kind.is_disc()));

    rig.apply_profile(&StyleProfile::new().with_joint_color(Color::BLUE));
    let exported = rig.export_profile();
    let mut other = Rig::new(400.0, 800.0).unwrap();
    other.apply_profile(&StyleProfile::from_json(&exported.to_json().unwrap()).unwrap());
    assert_eq!(other.joint_color(), Color::BLUE);
    assert_eq!(other.limb_color(), Color::BLACK);
}

#[test]
fn snapshot_tracks_rig_changes() {
    let mut rig = Rig::with_config(100.0, 200.0, &RigConfig::without_glyphs()).unwrap();
    let mut snapshotter = Snapshotter::new();

    let before = snapshotter.rasterize(&rig).unwrap();
    let torso = rig.position(JointId::Torso);
    assert_eq!(
        before.get_pixel(torso.x as u32, torso.y as u32).0,
        [255, 0, 0, 255]
    );

    drag_by(&mut rig, JointId::Torso, Point::new(0.0, 60.0));
    let after = snapshotter.rasterize(&rig).unwrap();
    assert_eq!(after.get_pixel(torso.x as u32, torso.y as u32 + 60).0, [255, 0, 0, 255]);
    assert_ne!(before, after);
}
