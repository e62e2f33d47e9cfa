use toasty::{Corner, ToastOptions, Toaster};

fn main() -> toasty::Result<()> {
  env_logger::init();
  let mut toaster = Toaster::default();

  let id = toaster.show(
    ToastOptions::new()
      .text("Saved")
      .duration(2000)
      .position(Corner::BottomRight)
      .callback(|doc, node| println!("removed: {}", doc.outer_html(node))),
  )?;
  println!("{}", toaster.document().outer_html(toaster.document().body()));

  toaster.run_until_idle()?;
  println!("{id} is {:?} at {}ms", toaster.state(id), toaster.now());
  Ok(())
}
