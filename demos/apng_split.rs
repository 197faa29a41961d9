use apng_split::png::split;

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  let args: Vec<String> = std::env::args().collect();
  if args.len() < 2 {
    println!("run this with the names of one or more APNG files to split.");
    return;
  }
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let apng = match split(&bytes) {
      Ok(apng) => apng,
      Err(e) => {
        println!("{}: {e}", path.display());
        continue;
      }
    };
    let descriptor = apng.descriptor();
    println!(
      "{}x{}, {} frames, plays {}",
      descriptor.width,
      descriptor.height,
      apng.frames().len(),
      descriptor.num_plays
    );
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("frame");
    for (n, (frame, png)) in apng.frames().iter().zip(apng.encode_frames()).enumerate() {
      let c = &frame.control;
      println!(
        "{n}: seq {} {}x{} at ({},{}) {}ms dispose {:?} blend {:?}",
        c.sequence_number,
        c.width,
        c.height,
        c.x_offset,
        c.y_offset,
        c.delay_millis(),
        c.dispose(),
        c.blend()
      );
      let png = match png {
        Ok(png) => png,
        Err(e) => {
          println!("{n}: {e}");
          continue;
        }
      };
      let out_path = path.with_file_name(format!("{stem}_frame_{n}.png"));
      if let Err(e) = std::fs::write(&out_path, png) {
        println!("{}: {e:?}", out_path.display());
      }
    }
  }
}
