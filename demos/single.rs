use toasty::{EventKind, ToastOptions, Toaster, ToasterConfig};

fn main() -> toasty::Result<()> {
  env_logger::init();
  let config = match std::env::args().nth(1) {
    Some(path) => ToasterConfig::load(path)?,
    None => ToasterConfig::default(),
  };
  let mut toaster = Toaster::new(config);

  let id = toaster.create(
    ToastOptions::new()
      .text("Hover me")
      .duration(3000)
      .keep_on_hover(true)
      .close(true)
      .theme("light"),
  );
  toaster.toast(id)?.show()?;
  let node = toaster.element(id).expect("toast was just shown");

  toaster.advance(2000)?;
  toaster.dispatch(node, EventKind::MouseEnter)?;
  toaster.advance(10_000)?;
  toaster.toast(id)?.set_text("Still here")?;
  println!("{}", toaster.document().outer_html(node));

  toaster.dispatch(node, EventKind::MouseLeave)?;
  toaster.run_until_idle()?;
  println!("{id} is {:?} at {}ms", toaster.state(id), toaster.now());
  Ok(())
}
