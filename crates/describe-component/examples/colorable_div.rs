//! ColorableDiv Demo - component suites on the nested host
//!
//! Registers a suite for a small `ColorableDiv` component, runs it and
//! prints the report, including the guard error a late `set_props` raises.
//!
//! # Running
//!
//! ```bash
//! DESCRIBE_COMPONENT_LOG=describe_component=debug \
//!     cargo run --example colorable_div -p describe-component
//! ```

#![allow(clippy::uninlined_format_args)]

use std::process::ExitCode;

use describe_component::prelude::*;

fn colorable_div() -> FnComponent {
    FnComponent::new(|props| {
        let mut div = Element::new("div").attr("data-component-name", "ColorableDiv");
        if let Some(color) = props.get_str("color") {
            div = div.style("color", color);
        }
        Some(div.children(props.children()).into())
    })
    .named("ColorableDiv")
}

fn main() -> ExitCode {
    let _ = init_test_logging();
    println!("=== describe-component: ColorableDiv ===\n");

    let config = match RunConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let spec = Spec::new("colorable_div");
    let describe = make_describe_component(&spec, VirtualDom::new());

    describe.describe_component(colorable_div(), |helpers| {
        let h = helpers.clone();
        spec.it("renders static markup", move || {
            println!("    markup: {}", h.render_wrapper()?.html());
            Ok(())
        });

        spec.describe("with a color", || {
            let h = helpers.clone();
            spec.before_each(move || h.set_props([("color", "red")]));

            let h = helpers.clone();
            spec.it("sets the inline style", move || {
                let div = h.mount_wrapper()?.find("div")?;
                println!("    style color: {:?}", div.style("color"));
                Ok(())
            });
        });

        let h = helpers.clone();
        spec.it("rejects props after mounting", move || {
            let wrapper = h.mount_wrapper()?;
            if let Err(e) = h.set_props([("color", "blue")]) {
                println!("    guard: {}", e);
            }
            wrapper.set_props([("color", "blue")])?;
            println!("    after wrapper.set_props: {}", wrapper.html());
            Ok(())
        });
    });

    let results = spec.run(&config);
    println!("\n{}", results);

    if results.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
