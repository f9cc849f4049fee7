use axum::response::{Html, Json};

use crate::api::handlers::{
    DELETED_MESSAGE, IDS_EXHAUSTED_MESSAGE, INVALID_ID_MESSAGE, NOT_FOUND_MESSAGE,
    READ_FAILED_MESSAGE, SAVE_FAILED_MESSAGE, WELCOME_MESSAGE,
};

// API Documentation handlers
pub async fn get_api_docs() -> Html<&'static str> {
    let html = r#"
<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API de Vehículos</title>
    <link rel="stylesheet" type="text/css"
          href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis]
            });
        };
    </script>
</body>
</html>
"#;
    Html(html)
}

fn error_response(description: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" },
                "example": { "error": message }
            }
        }
    })
}

const BODY_REJECTED_EXAMPLE: &str =
    "Failed to deserialize the JSON body into the target type: invalid type: sequence";

fn vehicle_response(description: &str) -> serde_json::Value {
    serde_json::json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Vehicle" }
            }
        }
    })
}

pub async fn get_openapi_spec() -> Json<serde_json::Value> {
    let id_parameter = serde_json::json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Identificador asignado por el servidor",
        "schema": { "type": "integer", "minimum": 1 }
    });
    let fields_body = serde_json::json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/VehicleFields" }
            }
        }
    });

    let spec = serde_json::json!({
        "openapi": "3.0.3",
        "info": {
            "title": "API de Vehículos",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "CRUD sobre una colección de vehículos persistida en un archivo JSON."
        },
        "servers": [
            {
                "url": "/",
                "description": "Current server"
            }
        ],
        "tags": [
            { "name": "Vehiculos", "description": "Operaciones sobre la colección de vehículos" },
            { "name": "Sistema", "description": "Bienvenida, estado y documentación" }
        ],
        "paths": {
            "/": {
                "get": {
                    "tags": ["Sistema"],
                    "summary": "Mensaje de bienvenida",
                    "responses": {
                        "200": {
                            "description": "Texto plano",
                            "content": { "text/plain": { "example": WELCOME_MESSAGE } }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "tags": ["Sistema"],
                    "summary": "Estado del servicio",
                    "responses": { "200": { "description": "El servicio responde" } }
                }
            },
            "/vehiculos": {
                "get": {
                    "tags": ["Vehiculos"],
                    "summary": "Listar todos los vehículos",
                    "responses": {
                        "200": {
                            "description": "Todos los vehículos en orden de inserción",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Vehicle" }
                                    }
                                }
                            }
                        },
                        "500": error_response("No se pudo leer el archivo", READ_FAILED_MESSAGE)
                    }
                },
                "post": {
                    "tags": ["Vehiculos"],
                    "summary": "Crear un vehículo",
                    "description": "El campo id lo asigna el servidor; si se envía, se ignora.",
                    "requestBody": fields_body.clone(),
                    "responses": {
                        "200": vehicle_response("Vehículo creado"),
                        "422": error_response("Cuerpo inválido", BODY_REJECTED_EXAMPLE),
                        "500": error_response(
                            &format!("No se pudo guardar el archivo, o: {}", IDS_EXHAUSTED_MESSAGE),
                            SAVE_FAILED_MESSAGE
                        )
                    }
                }
            },
            "/vehiculos/id/{id}": {
                "get": {
                    "tags": ["Vehiculos"],
                    "summary": "Obtener un vehículo por ID",
                    "parameters": [id_parameter.clone()],
                    "responses": {
                        "200": vehicle_response("Vehículo encontrado"),
                        "400": error_response("ID inválido", INVALID_ID_MESSAGE),
                        "404": error_response("No existe", NOT_FOUND_MESSAGE)
                    }
                },
                "put": {
                    "tags": ["Vehiculos"],
                    "summary": "Actualizar un vehículo",
                    "description": "Fusiona los campos enviados; el id no cambia.",
                    "parameters": [id_parameter.clone()],
                    "requestBody": fields_body,
                    "responses": {
                        "200": vehicle_response("Vehículo actualizado"),
                        "400": error_response("ID inválido", INVALID_ID_MESSAGE),
                        "404": error_response("No existe", NOT_FOUND_MESSAGE),
                        "422": error_response("Cuerpo inválido", BODY_REJECTED_EXAMPLE),
                        "500": error_response("No se pudo guardar el archivo", SAVE_FAILED_MESSAGE)
                    }
                },
                "delete": {
                    "tags": ["Vehiculos"],
                    "summary": "Eliminar un vehículo",
                    "parameters": [id_parameter],
                    "responses": {
                        "200": {
                            "description": "Vehículo eliminado",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/MessageResponse" },
                                    "example": { "message": DELETED_MESSAGE }
                                }
                            }
                        },
                        "400": error_response("ID inválido", INVALID_ID_MESSAGE),
                        "404": error_response("No existe", NOT_FOUND_MESSAGE),
                        "500": error_response("No se pudo guardar el archivo", SAVE_FAILED_MESSAGE)
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "VehicleFields": {
                    "type": "object",
                    "additionalProperties": true,
                    "example": { "marca": "Toyota", "modelo": "Corolla" }
                },
                "Vehicle": {
                    "type": "object",
                    "required": ["id"],
                    "properties": { "id": { "type": "integer", "minimum": 1 } },
                    "additionalProperties": true,
                    "example": { "id": 1, "marca": "Toyota", "modelo": "Corolla" }
                },
                "ErrorResponse": {
                    "type": "object",
                    "required": ["error"],
                    "properties": { "error": { "type": "string" } }
                },
                "MessageResponse": {
                    "type": "object",
                    "required": ["message"],
                    "properties": { "message": { "type": "string" } }
                }
            }
        }
    });
    Json(spec)
}
