use chaos_order::breakpoint::{Breakpoint, BreakpointConfigs};
use chaos_order::connections::CONNECTIONS;
use chaos_order::observer::SceneAdapter;
use chaos_order::prng::frame_noise_signed;
use chaos_order::scene::HeroScene;
use chaos_order::shapes::{ContainerSize, SHAPES};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return;
    }
    if args.len() >= 2 && args[1] == "table" {
        run_table();
        return;
    }
    if args.len() >= 2 && args[1] == "sweep-demo" {
        let width = args
            .get(2)
            .and_then(|w| w.parse::<u32>().ok())
            .unwrap_or(1280);
        run_sweep_demo(width);
        return;
    }

    if args.len() >= 2 {
        eprintln!("Unknown command: {}", args[1]);
        print_help();
        std::process::exit(2);
    }

    run_sweep_demo(1280);
}

fn print_help() {
    println!("chaos-order (proximity hero animation engine)");
    println!("usage:");
    println!("  cargo run");
    println!("  cargo run -- sweep-demo [VIEWPORT_WIDTH]");
    println!("  cargo run -- table");
    println!("  cargo run -- --help");
}

fn run_table() {
    let table = serde_json::json!({
        "shapes": SHAPES,
        "connections": CONNECTIONS,
        "breakpoints": Breakpoint::all()
            .iter()
            .map(|bp| serde_json::json!({
                "name": bp,
                "visible": bp.visible_shapes().len(),
                "workspace_height": bp.workspace_height(),
                "config": bp.config(),
            }))
            .collect::<Vec<_>>(),
    });
    match serde_json::to_string_pretty(&table) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("failed to encode table: {e}");
            std::process::exit(1);
        }
    }
}

/// Sweep the pointer across every chaos position with a little hand wobble
/// until the workspace completes.
fn run_sweep_demo(viewport_width: u32) {
    let mut scene = HeroScene::with_queue(viewport_width, BreakpointConfigs::default());
    let bp = scene.breakpoint();
    let container = ContainerSize::new(
        (viewport_width as f32).min(1100.0),
        bp.workspace_height(),
    );
    scene.resize(container);

    println!(
        "breakpoint={} shapes={} container={}x{}",
        bp.label(),
        scene.organizer().shapes().len(),
        container.width,
        container.height
    );

    let targets: Vec<_> = scene
        .organizer()
        .shapes()
        .iter()
        .map(|s| s.chaos_px(container))
        .collect();

    let mut frame = 0u64;
    let frames_per_target = 6u64;
    let max_frames = 2_000u64;

    while !scene.is_complete() && frame < max_frames {
        let idx = ((frame / frames_per_target) as usize) % targets.len().max(1);
        if let Some(&target) = targets.get(idx) {
            let mut p = target;
            p.x += frame_noise_signed(frame, 0) * 12.0;
            p.y += frame_noise_signed(frame, 1) * 12.0;
            scene.pointer_move(p);
        }

        if let Some(id) = scene.organizer_mut().scheduler_mut().take_due() {
            scene.on_frame(id);
        }
        let update = scene.update();

        if frame % 25 == 0 {
            let snap = SceneAdapter::new(&scene).snapshot();
            println!(
                "frame={frame:4} organized={:2}/{:2} changed_shapes={:2} changed_lines={}",
                snap.organizer.organized,
                snap.organizer.required,
                update.shapes.len(),
                update.lines.len()
            );
        }
        frame += 1;
    }

    if scene.is_complete() {
        println!("complete at frame {frame}");
    } else {
        println!("not complete after {max_frames} frames");
    }
}
