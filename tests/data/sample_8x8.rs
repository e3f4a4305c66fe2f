// Shared 8x8 BGR fixture: even pixels are (B=200, G=150, R=100), odd pixels are grey 50.
#[allow(dead_code)]
const SAMPLE_8X8_BGR: [u8; 192] = [
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
    200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50, 200, 150, 100, 50, 50, 50,
];
