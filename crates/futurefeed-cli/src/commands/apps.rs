use futurefeed_core::apps::default_catalog;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{:<10} {:<12} {}", "ID", "NAME", "ROLE");
    for app in default_catalog() {
        println!("{:<10} {:<12} {:?}", app.id, app.name, app.role);
    }
    Ok(())
}
