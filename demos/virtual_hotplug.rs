use padslot::backends::virtual_input::VirtualInputSource;
use padslot::logger::LifecycleLogger;
use padslot::{
    ControllerRegistry, EventFilter, LogicalAxis, LogicalButton, PlayerBinding, RegistryConfig, Slot,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let config = RegistryConfig::from_toml_str("probe_timeout_ticks = 600")?;
    let mut registry = ControllerRegistry::new(config)?;
    registry.add_listener(LifecycleLogger::new(), EventFilter::All, None);
    let mut player1 = PlayerBinding::new(1)?;

    let mut source = VirtualInputSource::new();
    let pad = Slot::new(2)?;

    // Scripted session: plug a wireless PS4 pad, wiggle it, drop it, bring it back.
    for frame in 0..12u32 {
        match frame {
            1 => source.plug(pad, "Wireless Controller"),
            3 => source.set_axis(pad, 7, -0.6),
            5 => source.press(pad, 1),
            7 => source.unplug(pad),
            9 => {
                source.plug(pad, "Wireless Controller");
                source.set_axis(pad, 3, 0.9);
            }
            _ => {}
        }

        let events = registry.tick(&source);
        for change in player1.update(&registry, &events) {
            println!("frame {frame}: player 1 {change:?}");
        }

        let rsy = player1.get_axis(&registry, &source, LogicalAxis::RSY);
        let lsy = player1.get_axis(&registry, &source, LogicalAxis::LSY);
        let b4 = player1.get_button_down(&registry, &source, LogicalButton::B4);
        println!("frame {frame}: LSY={lsy:+.2} RSY={rsy:+.2} B4 down={b4}");

        source.end_tick();
    }

    println!("{}", registry.snapshot(&source).to_json()?);
    Ok(())
}
