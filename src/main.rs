mod camera;

use camera::{Camera, Direction};

use log::{error, info, warn};
use math::{Conventions, Mat4, Vec2, Vec3, Vec4};

use core::f32::consts::FRAC_PI_4;

fn parse_conventions(arg: Option<&str>) -> Option<Conventions> {
    match arg {
        None | Some("gl") => Some(Conventions::OPENGL),
        Some("d3d") => Some(Conventions::DIRECT3D),
        Some("default") => Some(Conventions::DEFAULT),
        Some(_) => None,
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let arg = std::env::args().nth(1);
    let conventions = match parse_conventions(arg.as_deref()) {
        Some(c) => c,
        None => {
            error!("Unknown conventions {:?}, expected gl, d3d or default", arg);
            std::process::exit(2);
        }
    };
    info!("Using {:?} coordinates with {:?} depth", conventions.handedness, conventions.depth);

    println!("{}", Mat4::identity());

    let mut camera = Camera::new(
        conventions,
        Vec3::new(0., 2., 10.),
        Vec3::ZERO,
        Vec3::Y,
        FRAC_PI_4,
        16. / 9.,
        0.1,
        1000.,
        5.,
        0.005,
    );

    // A few frames of scripted input.
    let dt = 1. / 60.;
    for frame in 0..60 {
        camera.move_in_direction(Direction::Forward, dt);
        match frame % 20 {
            0 => camera.drag(Vec2::new(8., -2.)),
            5 => camera.move_in_direction(Direction::Right, dt),
            10 => camera.move_in_direction(Direction::Up, dt),
            15 => camera.move_in_direction(Direction::Left, dt),
            _ => {}
        }
    }
    camera.move_in_direction(Direction::Down, dt);
    camera.move_in_direction(Direction::Backward, dt);
    info!("Camera at {:.3} looking along {:.3}, up {:.3}", camera.position, camera.forward, camera.up);

    let view = camera.view();
    let view_projection = camera.view_projection();
    info!("View:\n{}", view);
    info!("View projection:\n{}", view_projection);
    info!("Uploading {} bytes of view projection", view_projection.as_bytes().len());

    let origin = view_projection * Vec4::new(0., 0., 0., 1.);
    info!("World origin in clip space {:.3}, ndc {:.3}", origin, origin.perspective_divide());

    match view_projection.try_inverse() {
        Ok(inverse) => {
            let back = (inverse * origin).perspective_divide();
            info!("Unprojected origin {:.3}", back);
        }
        Err(e) => warn!("View projection: {}", e),
    }

    if let Err(e) = Mat4::ZERO.try_inverse() {
        warn!("Zero matrix: {}", e);
    }
}
