use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("{}", "🚚 Fleet Booking Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    // Paso 1: Pedir URL del servidor
    let base_url = prompt_with_default("URL del servidor", "http://localhost:5000")?;
    let client = ApiClient::new(base_url);

    // Paso 2: Verificar que el servidor responde
    client.health().await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Registrar vehículo");
        println!("2. 🔍 Consultar disponibilidad");
        println!("3. 📅 Reservar vehículo");
        println!("4. 📋 Listar reservas de un cliente");
        println!("5. 🗑️  Cancelar reserva");
        println!("6. 🔁 Flujo completo (registrar → consultar → reservar → listar → cancelar)");
        println!("7. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-7): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let result = match choice.trim() {
            "1" => register_vehicle(&client).await.map(|_| ()),
            "2" => check_availability(&client).await,
            "3" => create_booking(&client).await.map(|_| ()),
            "4" => list_bookings(&client).await,
            "5" => cancel_booking(&client).await,
            "6" => full_flow(&client).await,
            "7" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ Error: {:#}", e).bright_red());
        }
    }

    Ok(())
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn health(&self) -> anyhow::Result<()> {
        let response = self.http.get(format!("{}/health", self.base_url)).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if status.is_success() {
            println!(
                "{}",
                format!("✅ Servidor activo (store: {})", body["store"].as_str().unwrap_or("?")).bright_green()
            );
            Ok(())
        } else {
            anyhow::bail!("health check devolvió {}", status)
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> anyhow::Result<(reqwest::StatusCode, Value)> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        print_response(status, &body)?;
        Ok((status, body))
    }
}

fn print_response(status: reqwest::StatusCode, body: &Value) -> anyhow::Result<()> {
    let label = format!("📥 {}", status);
    if status.is_success() {
        println!("{}", label.bright_green().bold());
    } else {
        println!("{}", label.bright_red().bold());
    }
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{}", format!("{}: ", label).bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn prompt_with_default(label: &str, default: &str) -> anyhow::Result<String> {
    let value = prompt(&format!("{} [{}]", label, default))?;
    Ok(if value.is_empty() { default.to_string() } else { value })
}

async fn register_vehicle(client: &ApiClient) -> anyhow::Result<Option<String>> {
    println!();
    println!("{}", "🚗 REGISTRAR VEHÍCULO".bright_cyan().bold());

    let name = prompt_with_default("Nombre", "Truck A")?;
    let capacity: f64 = prompt_with_default("Capacidad (kg)", "1000")?.parse()?;
    let tyres: i32 = prompt_with_default("Ruedas", "6")?.parse()?;

    let (status, body) = client
        .send(
            client
                .http
                .post(format!("{}/vehicles", client.base_url))
                .json(&json!({ "name": name, "capacityKg": capacity, "tyres": tyres })),
        )
        .await?;

    Ok(status.is_success().then(|| body["id"].as_str().unwrap_or_default().to_string()))
}

async fn check_availability(client: &ApiClient) -> anyhow::Result<()> {
    println!();
    println!("{}", "🔍 CONSULTAR DISPONIBILIDAD".bright_cyan().bold());

    let capacity = prompt_with_default("Capacidad requerida (kg)", "500")?;
    let from = prompt_with_default("Pincode origen", "100001")?;
    let to = prompt_with_default("Pincode destino", "100020")?;
    let start = prompt_with_default("Inicio (RFC 3339)", "2030-01-01T10:00:00Z")?;

    client
        .send(client.http.get(format!("{}/vehicles/available", client.base_url)).query(&[
            ("capacityRequired", capacity.as_str()),
            ("fromPincode", from.as_str()),
            ("toPincode", to.as_str()),
            ("startTime", start.as_str()),
        ]))
        .await?;
    Ok(())
}

async fn create_booking(client: &ApiClient) -> anyhow::Result<Option<String>> {
    println!();
    println!("{}", "📅 RESERVAR VEHÍCULO".bright_cyan().bold());

    let vehicle_id = prompt("ID del vehículo")?;
    let from = prompt_with_default("Pincode origen", "100001")?;
    let to = prompt_with_default("Pincode destino", "100020")?;
    let start = prompt_with_default("Inicio (RFC 3339)", "2030-01-01T10:00:00Z")?;
    let customer = prompt_with_default("Cliente", "customer-1")?;

    book(client, &vehicle_id, &from, &to, &start, &customer).await
}

async fn book(
    client: &ApiClient,
    vehicle_id: &str,
    from: &str,
    to: &str,
    start: &str,
    customer: &str,
) -> anyhow::Result<Option<String>> {
    let (status, body) = client
        .send(client.http.post(format!("{}/bookings", client.base_url)).json(&json!({
            "vehicleId": vehicle_id,
            "fromPincode": from,
            "toPincode": to,
            "startTime": start,
            "customerId": customer
        })))
        .await?;

    Ok(status.is_success().then(|| body["id"].as_str().unwrap_or_default().to_string()))
}

async fn list_bookings(client: &ApiClient) -> anyhow::Result<()> {
    println!();
    println!("{}", "📋 RESERVAS DE UN CLIENTE".bright_cyan().bold());

    let customer = prompt_with_default("Cliente", "customer-1")?;
    client
        .send(
            client
                .http
                .get(format!("{}/bookings", client.base_url))
                .query(&[("customerId", customer.as_str())]),
        )
        .await?;
    Ok(())
}

async fn cancel_booking(client: &ApiClient) -> anyhow::Result<()> {
    println!();
    println!("{}", "🗑️  CANCELAR RESERVA".bright_cyan().bold());

    let id = prompt("ID de la reserva")?;
    client
        .send(client.http.delete(format!("{}/bookings/{}", client.base_url, id)))
        .await?;
    Ok(())
}

async fn full_flow(client: &ApiClient) -> anyhow::Result<()> {
    println!();
    println!("{}", "🔁 FLUJO COMPLETO".bright_cyan().bold());
    println!("{}", "=================".bright_cyan());

    let customer = "smoke-test-customer";
    let start = "2030-01-01T10:00:00Z";

    println!("{}", "1️⃣  Registrando vehículo...".bright_blue());
    let (status, vehicle) = client
        .send(client.http.post(format!("{}/vehicles", client.base_url)).json(&json!({
            "name": "Smoke Test Truck",
            "capacityKg": 1500,
            "tyres": 6
        })))
        .await?;
    anyhow::ensure!(status.is_success(), "no se pudo registrar el vehículo");
    let vehicle_id = vehicle["id"].as_str().unwrap_or_default().to_string();

    println!("{}", "2️⃣  Consultando disponibilidad...".bright_blue());
    client
        .send(client.http.get(format!("{}/vehicles/available", client.base_url)).query(&[
            ("capacityRequired", "1000"),
            ("fromPincode", "100001"),
            ("toPincode", "100020"),
            ("startTime", start),
        ]))
        .await?;

    println!("{}", "3️⃣  Reservando...".bright_blue());
    let booking_id = book(client, &vehicle_id, "100001", "100020", start, customer)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no se pudo crear la reserva"))?;

    println!("{}", "4️⃣  Reservando de nuevo la misma ventana (debe fallar)...".bright_blue());
    let duplicate = book(client, &vehicle_id, "100001", "100020", start, customer).await?;
    if duplicate.is_none() {
        println!("{}", "✅ Solapamiento rechazado".bright_green());
    } else {
        println!("{}", "⚠️ Se aceptó una reserva solapada".bright_yellow());
    }

    println!("{}", "5️⃣  Listando reservas...".bright_blue());
    client
        .send(
            client
                .http
                .get(format!("{}/bookings", client.base_url))
                .query(&[("customerId", customer)]),
        )
        .await?;

    println!("{}", "6️⃣  Cancelando reserva...".bright_blue());
    client
        .send(client.http.delete(format!("{}/bookings/{}", client.base_url, booking_id)))
        .await?;

    println!("{}", "✅ Flujo completo terminado".bright_green().bold());
    Ok(())
}
