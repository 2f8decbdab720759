use addnew::styles::StyleSheet;
use anyhow::Result;

fn main() -> Result<()> {
    let args = addnew::args::parsed();
    addnew::logging::init(args.verbose);

    let style = StyleSheet::for_stderr(args.color);
    addnew::run(&args.settings, &style)?;
    Ok(())
}
