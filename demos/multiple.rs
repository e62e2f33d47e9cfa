use toasty::{Corner, ToastOptions, Toaster};

fn main() -> toasty::Result<()> {
  env_logger::init();
  let mut toaster = Toaster::default();

  for i in 1..4 {
    toaster.show(
      ToastOptions::new()
        .text(format!("Just kidding, this is just the toast example {}.", i).as_str())
        .duration(1000 * i)
        .position(Corner::BottomRight)
        .close(true),
    )?;
  }
  println!("{}", toaster.document().outer_html(toaster.document().body()));

  toaster.advance(1400)?;
  println!("{}", toaster.document().outer_html(toaster.document().body()));

  println!("cleared {} toasts", toaster.clear_all()?);
  Ok(())
}
