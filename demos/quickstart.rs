use run42195::{distance, duration, pace, speed, UnitSystem, MARATHON};

fn main() -> run42195::Result<()> {
    let finish = duration("3:29:59")?;
    let avg = finish / MARATHON;

    println!("marathon: {MARATHON}");
    println!("finish:   {finish}");
    println!("pace:     {avg}");
    println!("speed:    {}", avg.to_speed());

    let _imperial = UnitSystem::Imperial.scope();
    println!("pace:     {avg}");
    println!("10k:      {}", distance("10 km")?);
    println!("at 8:00:  {}", distance(13.1)? * pace("8:00")?);
    println!("tempo:    {}", speed(8.5)?.to_pace());
    Ok(())
}
